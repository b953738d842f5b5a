//! Read-only observation of the engine
//!
//! The engine is single-owner. Secondary UI surfaces get a [`PlayerObserver`],
//! a cloneable handle onto the snapshot the engine republishes after every
//! command and applied output event. It has no way to mutate the engine.

use crate::types::PlaybackState;
use preview_core::Track;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Everything the UI layer observes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    /// Derived playback state
    pub state: PlaybackState,
    /// Playable playlist in caller order
    ///
    /// Shared between snapshots until the playlist or shuffle changes.
    pub playlist: Arc<Vec<Track>>,
    /// Shuffled projection (empty when shuffle is off)
    pub shuffled_playlist: Arc<Vec<Track>>,
    /// Cursor into `playlist`
    pub current_index: usize,
    /// Cursor into `shuffled_playlist`
    pub current_shuffled_index: usize,
    /// Current track
    pub current_track: Option<Track>,
    /// Playback intent
    pub is_playing: bool,
    /// Waiting for the output to become ready
    pub is_loading: bool,
    /// Shuffle flag
    pub is_shuffle_on: bool,
    /// Repeat flag
    pub is_repeat_on: bool,
    /// Displayed position (seek buffer while seeking)
    pub current_time: Duration,
    /// Known duration (zero until discovered)
    pub duration: Duration,
    /// `current_time / duration`, 0 without a duration
    pub progress: f64,
    /// Interactive seek in progress
    pub is_seek_in_progress: bool,
    /// Last surfaced user-visible error
    pub player_error: Option<String>,
    /// Whether `next` would do anything
    pub has_next: bool,
    /// Whether `previous` would do anything
    pub has_previous: bool,
}

/// Read-only handle onto the engine's published snapshot
#[derive(Debug, Clone, Default)]
pub struct PlayerObserver {
    shared: Arc<RwLock<PlayerSnapshot>>,
}

impl PlayerObserver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Copy of the latest published snapshot
    pub fn snapshot(&self) -> PlayerSnapshot {
        match self.shared.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply `f` to the latest snapshot without cloning it
    pub fn with_snapshot<T>(&self, f: impl FnOnce(&PlayerSnapshot) -> T) -> T {
        match self.shared.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    pub(crate) fn publish(&self, snapshot: PlayerSnapshot) {
        let mut guard = match self.shared.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = snapshot;
    }
}
