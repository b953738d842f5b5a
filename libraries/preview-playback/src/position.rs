//! Position tracking
//!
//! Reconciles live clock ticks, an in-progress interactive seek and duration
//! discovery into one displayed position/duration/progress view.
//!
//! While a seek buffer is present it is authoritative for display and live
//! ticks are ignored, so the displayed position never jumps back under the
//! user's finger. The buffer survives `commit_seek` and is only cleared when
//! the output reports the seek finished (or a new track starts loading).

use std::time::Duration;

/// Convert raw output seconds to a position, rejecting NaN, infinities and
/// negative values
pub(crate) fn valid_seconds(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

/// Displayed position, duration and seek state for the current item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTracker {
    live_position: Duration,
    duration: Duration,
    duration_locked: bool,
    seek_buffer: Option<Duration>,
}

impl PositionTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Live clock =====

    /// Apply a periodic position tick
    ///
    /// Returns true if the live position changed. Ticks are ignored while a
    /// seek is in progress and when the time is not a valid position.
    pub fn observe_tick(&mut self, secs: f64) -> bool {
        if self.seek_buffer.is_some() {
            return false;
        }
        match valid_seconds(secs) {
            Some(position) => {
                self.live_position = position;
                true
            }
            None => false,
        }
    }

    /// Live playback position (ignores the seek buffer)
    pub fn live_position(&self) -> Duration {
        self.live_position
    }

    // ===== Interactive seek =====

    /// Enter seek mode, capturing the displayed position; idempotent
    pub fn begin_interactive_seek(&mut self) {
        if self.seek_buffer.is_none() {
            self.seek_buffer = Some(self.live_position);
        }
    }

    /// Move the seek buffer to `position`, entering seek mode if needed
    pub fn set_interactive_seek_value(&mut self, position: Duration) {
        self.begin_interactive_seek();
        self.seek_buffer = Some(position);
    }

    /// Target of the in-progress seek, if any
    ///
    /// The buffer is kept until [`complete_seek`](Self::complete_seek).
    pub fn commit_seek(&self) -> Option<Duration> {
        self.seek_buffer
    }

    /// Finish the in-progress seek
    ///
    /// `reached` is the committed target when the output completed the seek,
    /// `None` when it did not; the live position then stays where it was.
    pub fn complete_seek(&mut self, reached: Option<Duration>) {
        if let Some(position) = reached {
            self.live_position = position;
        }
        self.seek_buffer = None;
    }

    /// Whether an interactive seek is in progress
    pub fn is_seeking(&self) -> bool {
        self.seek_buffer.is_some()
    }

    /// Raw seek buffer
    pub fn seek_buffer(&self) -> Option<Duration> {
        self.seek_buffer
    }

    // ===== Duration =====

    /// Offer a duration reported by one of the output's sources
    ///
    /// The first valid positive value wins; later writes are ignored until the
    /// track changes. A zero duration is recorded but does not lock, since the
    /// output commonly reports zero before metadata resolves. Returns true if
    /// the stored duration changed.
    pub fn record_duration(&mut self, secs: f64) -> bool {
        if self.duration_locked {
            return false;
        }
        let Some(duration) = valid_seconds(secs) else {
            return false;
        };
        self.duration_locked = !duration.is_zero();
        let changed = self.duration != duration;
        self.duration = duration;
        changed
    }

    /// Known duration (zero until discovered)
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether a definitive duration has been recorded
    pub fn is_duration_known(&self) -> bool {
        self.duration_locked
    }

    // ===== Derived view =====

    /// Seek buffer while seeking, otherwise the live position
    pub fn displayed_position(&self) -> Duration {
        self.seek_buffer.unwrap_or(self.live_position)
    }

    /// Displayed position as a fraction of the duration; 0 when the duration is zero
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        self.displayed_position().as_secs_f64() / self.duration.as_secs_f64()
    }

    // ===== Reset =====

    /// Zero the live position (stop, end of item)
    pub fn reset_position(&mut self) {
        self.live_position = Duration::ZERO;
    }

    /// Forget everything (a new item is loading)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
