/// CLI error types
use preview_core::TrackId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read playlist {path:?}: {source}")]
    ReadPlaylist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid playlist JSON: {0}")]
    PlaylistFormat(#[from] serde_json::Error),

    #[error("Playlist contains no playable tracks")]
    NoPlayableTrack,

    #[error("Track {0} is not in the playlist")]
    TrackNotInPlaylist(TrackId),

    #[error("Invalid start position: {0}")]
    InvalidStartPosition(f64),

    #[error("Failed to start simulated output: {0}")]
    Output(#[from] std::io::Error),
}
