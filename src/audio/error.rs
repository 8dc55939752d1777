use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decoding error: {0}")]
    Decoding(String),
}
