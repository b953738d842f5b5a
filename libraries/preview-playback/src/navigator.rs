//! Playlist navigation
//!
//! Owns the linear playlist, the optional shuffled projection and one cursor
//! per order. Only the cursor of the active order moves; the other is
//! resolved when shuffle is toggled.

use crate::error::{PlaybackError, Result};
use crate::shuffle::shuffled_order;
use preview_core::{Track, TrackId};
use rand::RngCore;
use std::fmt;
use tracing::debug;

/// Playlist with sequential, shuffled and repeating navigation
pub struct PlaylistNavigator {
    /// Playable tracks in caller order
    playlist: Vec<Track>,

    /// Shuffled projection as indices into `playlist` (empty when shuffle is off)
    shuffled_order: Vec<usize>,

    /// Cursor into `playlist`
    current_index: usize,

    /// Cursor into `shuffled_order`
    current_shuffled_index: usize,

    shuffle_on: bool,
    repeat_on: bool,

    rng: Box<dyn RngCore + Send>,
}

impl PlaylistNavigator {
    /// Create an empty navigator drawing shuffle order from `rng`
    pub fn new(rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            playlist: Vec::new(),
            shuffled_order: Vec::new(),
            current_index: 0,
            current_shuffled_index: 0,
            shuffle_on: false,
            repeat_on: false,
            rng,
        }
    }

    // ===== Loading =====

    /// Replace the playlist and point the cursor at `starting_id`
    ///
    /// Unplayable tracks are dropped from `tracks`. Fails without touching any
    /// state if the starting track is absent from `tracks`
    /// ([`PlaybackError::TrackNotFound`]) or present but unplayable
    /// ([`PlaybackError::InvalidPreviewUrl`]). Returns the linear index of the
    /// starting track in the filtered playlist.
    pub fn load(&mut self, tracks: &[Track], starting_id: TrackId) -> Result<usize> {
        let requested = tracks
            .iter()
            .find(|track| track.id == starting_id)
            .ok_or(PlaybackError::TrackNotFound(starting_id))?;
        if !requested.is_playable() {
            return Err(PlaybackError::InvalidPreviewUrl(starting_id));
        }

        let playlist: Vec<Track> = tracks.iter().filter(|t| t.is_playable()).cloned().collect();
        let index = playlist
            .iter()
            .position(|track| track.id == starting_id)
            .ok_or(PlaybackError::TrackNotFound(starting_id))?;

        debug!(
            track_id = starting_id,
            index,
            total = tracks.len(),
            playable = playlist.len(),
            "playlist loaded"
        );

        self.playlist = playlist;
        self.current_index = index;
        self.current_shuffled_index = 0;
        self.shuffled_order.clear();
        if self.shuffle_on {
            self.rebuild_shuffled_order();
        }

        Ok(index)
    }

    // ===== Navigation =====

    /// Advance the active cursor
    ///
    /// Wraps to the first track when repeat is on; otherwise a no-op at the
    /// last track. Returns true if the cursor moved (wrapping onto itself in a
    /// one-track playlist counts).
    pub fn next(&mut self) -> bool {
        let len = self.active_len();
        if len == 0 {
            return false;
        }
        let repeat_on = self.repeat_on;
        let cursor = self.active_cursor_mut();

        if *cursor + 1 < len {
            *cursor += 1;
        } else if repeat_on {
            *cursor = 0;
        } else {
            return false;
        }
        true
    }

    /// Retreat the active cursor
    ///
    /// Wraps to the last track when repeat is on; otherwise a no-op at the
    /// first track.
    pub fn previous(&mut self) -> bool {
        let len = self.active_len();
        if len == 0 {
            return false;
        }
        let repeat_on = self.repeat_on;
        let cursor = self.active_cursor_mut();

        if *cursor > 0 {
            *cursor -= 1;
        } else if repeat_on {
            *cursor = len - 1;
        } else {
            return false;
        }
        true
    }

    /// Whether `next` would move the cursor
    pub fn has_next(&self) -> bool {
        let len = self.active_len();
        len > 0 && (self.repeat_on || self.active_index() + 1 < len)
    }

    /// Whether `previous` would move the cursor
    pub fn has_previous(&self) -> bool {
        self.active_len() > 0 && (self.repeat_on || self.active_index() > 0)
    }

    // ===== Shuffle / Repeat =====

    /// Flip shuffle
    ///
    /// Enabling builds a projection that starts with the current track and
    /// resets the shuffled cursor to 0. Disabling moves the linear cursor to
    /// the track that was active in shuffled order and drops the projection.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle_on = !self.shuffle_on;

        if self.shuffle_on {
            self.rebuild_shuffled_order();
        } else {
            self.current_index = self
                .shuffled_order
                .get(self.current_shuffled_index)
                .copied()
                .filter(|&index| index < self.playlist.len())
                .unwrap_or(0);
            self.shuffled_order.clear();
            self.current_shuffled_index = 0;
        }

        debug!(shuffle = self.shuffle_on, "shuffle toggled");
        self.shuffle_on
    }

    /// Set repeat
    pub fn set_repeat(&mut self, repeat_on: bool) {
        self.repeat_on = repeat_on;
    }

    /// Flip repeat
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat_on = !self.repeat_on;
        self.repeat_on
    }

    fn rebuild_shuffled_order(&mut self) {
        let first = (!self.playlist.is_empty()).then_some(self.current_index);
        self.shuffled_order = shuffled_order(self.playlist.len(), first, &mut *self.rng);
        self.current_shuffled_index = 0;
    }

    // ===== Accessors =====

    /// Track under the active cursor
    pub fn current_track(&self) -> Option<&Track> {
        let index = if self.shuffle_on {
            *self.shuffled_order.get(self.current_shuffled_index)?
        } else {
            self.current_index
        };
        self.playlist.get(index)
    }

    /// Linear playlist
    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    /// Shuffled projection (empty when shuffle is off)
    pub fn shuffled_playlist(&self) -> Vec<&Track> {
        self.shuffled_order
            .iter()
            .filter_map(|&index| self.playlist.get(index))
            .collect()
    }

    /// Cursor into the linear playlist
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Cursor into the shuffled projection
    pub fn current_shuffled_index(&self) -> usize {
        self.current_shuffled_index
    }

    /// Cursor of whichever order is active
    pub fn active_index(&self) -> usize {
        if self.shuffle_on {
            self.current_shuffled_index
        } else {
            self.current_index
        }
    }

    /// Whether shuffle is on
    pub fn is_shuffle_on(&self) -> bool {
        self.shuffle_on
    }

    /// Whether repeat is on
    pub fn is_repeat_on(&self) -> bool {
        self.repeat_on
    }

    /// Number of playable tracks
    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    /// Whether no playlist is loaded
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    fn active_len(&self) -> usize {
        if self.shuffle_on {
            self.shuffled_order.len()
        } else {
            self.playlist.len()
        }
    }

    fn active_cursor_mut(&mut self) -> &mut usize {
        if self.shuffle_on {
            &mut self.current_shuffled_index
        } else {
            &mut self.current_index
        }
    }
}

impl fmt::Debug for PlaylistNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaylistNavigator")
            .field("len", &self.playlist.len())
            .field("shuffled_order", &self.shuffled_order)
            .field("current_index", &self.current_index)
            .field("current_shuffled_index", &self.current_shuffled_index)
            .field("shuffle_on", &self.shuffle_on)
            .field("repeat_on", &self.repeat_on)
            .finish_non_exhaustive()
    }
}
