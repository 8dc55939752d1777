#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Transient notice for the status line, e.g. a failed preview load.
    pub status: Option<String>,
}
