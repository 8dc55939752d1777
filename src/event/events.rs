use crate::audio::state::ControlHandle;
use crate::model::{MoodRequest, Recommendation};

#[derive(Debug, Clone)]
pub enum Event {
    // Events
    RecommendationsFetched(u64, Recommendation),
    FetchError(u64, String),
    PreviewStarted(String),
    PreviewPaused,
    PreviewEnded,
    PreviewError(String),

    // Commands
    Submit(MoodRequest),
    TogglePreview {
        url: String,
        control: ControlHandle,
    },
    OpenLink(String),
    Quit,
}
