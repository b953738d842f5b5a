/// Core error types for Preview Player
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Preview Player
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Track carries no preview reference at all
    #[error("Track {0} has no preview URL")]
    MissingPreviewUrl(TrackId),

    /// Preview reference is present but is not an absolute URL
    #[error("Invalid preview URL: {0}")]
    InvalidPreviewUrl(#[from] url::ParseError),

    /// Audio session configuration or activation failed
    #[error("Audio session error: {0}")]
    Session(String),
}

impl CoreError {
    /// Create an audio session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }
}
