use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::model::{MoodRequest, Recommendation, Track};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Shown whenever the service fails without a usable message of its own.
const GENERIC_FAILURE: &str = "Could not fetch recommendations. Please try again.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The service answered, but carried a failure report in the body. This
    /// happens with a success status too; the backend uses the body's
    /// `error` field as a second error channel.
    #[error("{0}")]
    Domain(String),

    /// Network failure, non-success status, or a body that decodes to
    /// neither songs nor an error report. The payload is the message to
    /// display; transport detail goes to the log.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Domain(msg) | ApiError::Transport(msg) => msg,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    songs: Option<Vec<Track>>,
    #[serde(default)]
    error: Option<String>,
}

/// Classifies a predict response into the three channels: recommendations,
/// a body-level error report, or a transport failure. Pure so the decoding
/// rules are testable without a server.
fn decode_predict_response(status: StatusCode, body: &[u8]) -> Result<Recommendation, ApiError> {
    let parsed: Option<PredictResponse> = serde_json::from_slice(body).ok();

    if let Some(error) = parsed.as_ref().and_then(|r| r.error.clone()) {
        return Err(if status.is_success() {
            ApiError::Domain(error)
        } else {
            ApiError::Transport(error)
        });
    }

    if !status.is_success() {
        return Err(ApiError::Transport(GENERIC_FAILURE.to_string()));
    }

    match parsed {
        Some(PredictResponse {
            mood: Some(mood),
            songs: Some(songs),
            ..
        }) => Ok(Recommendation { mood, songs }),
        _ => Err(ApiError::Transport(GENERIC_FAILURE.to_string())),
    }
}

pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
}

impl ApiService {
    pub fn from_env() -> Self {
        let base_url = std::env::var("MOODTUNE_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn classify(&self, request: &MoodRequest) -> Result<Recommendation, ApiError> {
        let url = format!("{}/api/predict", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "predict_request_failed");
                ApiError::Transport(GENERIC_FAILURE.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, "predict_body_read_failed");
            ApiError::Transport(GENERIC_FAILURE.to_string())
        })?;

        let result = decode_predict_response(status, &body);
        match &result {
            Ok(recommendation) => info!(
                mood = recommendation.mood.as_str(),
                songs = recommendation.songs.len(),
                "predict_ok"
            ),
            Err(e) => warn!(status = status.as_u16(), error = %e, "predict_failed"),
        }

        result
    }
}
