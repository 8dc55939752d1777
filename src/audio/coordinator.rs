use std::collections::HashMap;

use tracing::debug;

use crate::audio::state::{ActivePreview, ControlHandle, ControlIcon, ControlVisual};
use crate::audio::traits::PreviewOutput;

/// Coordinates the single shared audio output so at most one preview plays
/// at a time.
///
/// All mutation of the output flows through [`toggle`](Self::toggle) and
/// the two signal handlers; the rendering side only reads control visuals
/// back out. The pause/ended signal handlers are the single authority that
/// clears the current-control bookkeeping — the prior-control reset inside
/// `toggle` touches visuals only.
pub struct PlaybackCoordinator<O: PreviewOutput> {
    output: O,
    current: Option<ActivePreview>,
    visuals: HashMap<ControlHandle, ControlVisual>,
}

impl<O: PreviewOutput> PlaybackCoordinator<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            current: None,
            visuals: HashMap::new(),
        }
    }

    pub fn toggle(&mut self, url: &str, control: ControlHandle) {
        let same_and_playing =
            self.output.source().as_deref() == Some(url) && !self.output.is_paused();

        if same_and_playing {
            // The only path that stops playback without starting another.
            self.output.pause();
            return;
        }

        if let Some(active) = &self.current
            && active.control != control
        {
            // Exactly one prior control gets reset, and only visually; the
            // current pointer is overwritten below.
            let previous = active.control;
            self.set_visual(previous, ControlIcon::Play, false);
        }

        self.output.set_source(url);
        self.output.play();
        self.set_visual(control, ControlIcon::Pause, true);
        self.current = Some(ActivePreview {
            url: url.to_string(),
            control,
        });
    }

    /// Pause signal from the shared output. Fires for user-initiated and
    /// programmatic pauses alike.
    pub fn on_pause(&mut self) {
        if let Some(active) = self.current.take() {
            debug!(url = active.url.as_str(), "preview_paused");
            self.set_visual(active.control, ControlIcon::Play, false);
        }
    }

    /// End-of-stream signal from the shared output. Same effect as a pause.
    pub fn on_ended(&mut self) {
        if let Some(active) = self.current.take() {
            debug!(url = active.url.as_str(), "preview_ended");
            self.set_visual(active.control, ControlIcon::Play, false);
        }
    }

    /// Every control handle went stale because the grid was re-rendered:
    /// drop the bookkeeping and visuals. Playback itself is untouched.
    pub fn detach_controls(&mut self) {
        self.current = None;
        self.visuals.clear();
    }

    pub fn visual(&self, control: ControlHandle) -> ControlVisual {
        self.visuals.get(&control).copied().unwrap_or_default()
    }

    pub fn current(&self) -> Option<&ActivePreview> {
        self.current.as_ref()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    fn set_visual(&mut self, control: ControlHandle, icon: ControlIcon, playing_marker: bool) {
        self.visuals.insert(
            control,
            ControlVisual {
                icon,
                playing_marker,
            },
        );
    }
}
