/// Opaque handle to a track's play/pause control. The coordinator never
/// assumes anything about the widget behind it; the grid hands out
/// index-backed handles when it renders a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlIcon {
    #[default]
    Play,
    Pause,
}

/// Visual state of one control: its icon and whether its card carries the
/// "playing" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlVisual {
    pub icon: ControlIcon,
    pub playing_marker: bool,
}

/// The preview currently loaded and not paused/ended, with the control that
/// started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePreview {
    pub url: String,
    pub control: ControlHandle,
}
