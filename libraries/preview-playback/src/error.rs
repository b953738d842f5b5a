//! Error types for the playback engine

use preview_core::TrackId;
use thiserror::Error;

/// Fallback text for output failures without a description
pub const UNKNOWN_PLAYER_ERROR: &str = "Unknown player error";

/// Playback errors
///
/// `Display` is the user-facing message the engine exposes as `player_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Audio session configuration or activation failed (non-fatal)
    #[error("Audio session setup failed")]
    SessionSetup {
        /// Underlying session error
        reason: String,
    },

    /// Requested track is not part of its own playlist
    #[error("Failed to find song in playlist")]
    TrackNotFound(TrackId),

    /// Requested track has no usable preview reference
    #[error("Invalid preview URL")]
    InvalidPreviewUrl(TrackId),

    /// Output reported the loaded item failed
    #[error("{}", media_message(.0))]
    Media(Option<String>),

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Seek commit requested without a seek in progress
    #[error("No seek in progress")]
    NoSeekInProgress,
}

impl PlaybackError {
    /// Whether this error is surfaced to the user as `player_error`
    ///
    /// Command no-ops (nothing loaded, nothing to commit) are reported to the
    /// caller only.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::NoTrackLoaded | Self::NoSeekInProgress)
    }
}

fn media_message(description: &Option<String>) -> &str {
    match description.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => UNKNOWN_PLAYER_ERROR,
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
