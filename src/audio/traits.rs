/// Surface of the one shared audio output: a current source, play/pause
/// intent, and a paused flag. [`PreviewEngine`](crate::audio::engine)
/// implements it over a real sink; tests substitute a recording fake.
///
/// `pause` and end-of-stream are reported back asynchronously as
/// [`Event::PreviewPaused`](crate::event::events::Event) and
/// [`Event::PreviewEnded`](crate::event::events::Event); the coordinator's
/// signal handlers are the only consumers.
pub trait PreviewOutput: Send {
    /// Replaces the current source. Loading may complete off the event
    /// loop; playback begins once loaded while play intent is set.
    fn set_source(&self, url: &str);

    /// Sets play intent and resumes the output if a source is loaded.
    fn play(&self);

    /// Clears play intent and pauses the output.
    fn pause(&self);

    /// True when no preview is playing or pending playback. Mirrors the
    /// paused flag of the output, not the sink's buffer state.
    fn is_paused(&self) -> bool;

    fn source(&self) -> Option<String>;
}
