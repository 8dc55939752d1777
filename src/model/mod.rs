use serde::{Deserialize, Serialize};

/// Snapshot of the form taken at submit time. The selector enums below are
/// flattened into their wire codes before this is built, so a request is
/// immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodRequest {
    pub message: String,
    pub language: String,
    pub preference: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub song_name: String,
    pub artist: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    pub spotify_url: String,
}

impl Track {
    pub fn has_preview(&self) -> bool {
        self.preview_url.is_some()
    }
}

/// A successful classification: the detected mood plus the ranked songs.
/// Song order is the backend's ranking and is preserved everywhere.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub mood: String,
    pub songs: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Telugu,
    Hindi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Telugu => "te",
            Language::Hindi => "hi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Telugu => "Telugu",
            Language::Hindi => "Hindi",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Language::English => Language::Telugu,
            Language::Telugu => Language::Hindi,
            Language::Hindi => Language::English,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Language::English => Language::Hindi,
            Language::Telugu => Language::English,
            Language::Hindi => Language::Telugu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preference {
    #[default]
    Match,
    Uplift,
}

impl Preference {
    pub fn code(&self) -> &'static str {
        match self {
            Preference::Match => "match",
            Preference::Uplift => "uplift",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preference::Match => "Match my mood",
            Preference::Uplift => "Lift me up",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Preference::Match => Preference::Uplift,
            Preference::Uplift => Preference::Match,
        }
    }
}
