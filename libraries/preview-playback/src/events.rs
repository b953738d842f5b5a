//! Player events
//!
//! Change notifications for the UI layer. The engine queues them as commands
//! and output events are applied; the UI drains them with
//! [`PlaybackEngine::drain_events`](crate::PlaybackEngine::drain_events).

use crate::types::PlaybackState;
use preview_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Observable playback state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new track
        track_id: TrackId,
        /// ID of the track it replaced (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Displayed position changed
    PositionChanged {
        /// Displayed position in milliseconds
        position_ms: u64,
    },

    /// Track duration was discovered
    DurationChanged {
        /// Duration in milliseconds
        duration_ms: u64,
    },

    /// Shuffle was toggled
    ShuffleChanged {
        /// Whether shuffle is now on
        enabled: bool,
    },

    /// Repeat was toggled
    RepeatChanged {
        /// Whether repeat is now on
        enabled: bool,
    },

    /// A user-visible error was surfaced
    Error {
        /// User-facing message
        message: String,
    },
}
