use std::sync::Arc;

use flume::Sender;

use crate::{
    audio::{coordinator::PlaybackCoordinator, engine::PreviewEngine},
    event::events::Event,
    http::ApiService,
    request::lifecycle::RequestLifecycle,
};

/// The owned singletons every part of the UI works against. Nothing here
/// is ambient state; views read it, the event handler mutates it.
pub struct AppContext {
    pub api: Arc<ApiService>,
    pub event_tx: Sender<Event>,
    pub lifecycle: RequestLifecycle,
    pub playback: PlaybackCoordinator<PreviewEngine>,
}
