//! Core types for the playback engine

use preview_core::SessionSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Observable playback state
///
/// Derived from the engine's flags; end-of-item is transient and resolves to
/// either the next track loading or `Stopped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing has been played yet
    #[default]
    Idle,

    /// Item attached, waiting for readiness
    Loading,

    /// Producing audio
    Playing,

    /// Item attached but paused
    Paused,

    /// Paused at position zero after `stop` or the end of the playlist
    Stopped,

    /// Output reported the item failed
    Error,
}

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Periodic position observer interval in milliseconds (default: 100)
    pub tick_interval_ms: u64,

    /// Audio session settings applied once at construction
    pub session: SessionSettings,

    /// Initial shuffle flag (default: off)
    pub shuffle: bool,

    /// Initial repeat flag (default: off)
    pub repeat: bool,
}

impl EngineConfig {
    /// Position observer interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            session: SessionSettings::default(),
            shuffle: false,
            repeat: false,
        }
    }
}
