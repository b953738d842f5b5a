//! Output events
//!
//! Everything an audio output reports asynchronously (readiness, duration,
//! failure, periodic position, end-of-item, seek completion) travels over one
//! typed channel back to the control thread. Each event carries the
//! [`Generation`] of the media item it belongs to, so the receiver can drop
//! events from items that have since been replaced with a single comparison.

use crossbeam_channel::Sender;
use std::fmt;

/// Monotonically increasing tag of an attached media item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Wrap a raw generation value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The generation that follows this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Identifies one seek request; completions are matched 1:1 against it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeekId(u64);

impl SeekId {
    /// Wrap a raw seek id
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Handle returned when a periodic position observer is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

impl ObserverHandle {
    /// Wrap a raw handle value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// What happened on the output
///
/// Times are raw seconds as the output measured them. They may be NaN or
/// infinite when the output does not know yet; receivers validate them.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEventKind {
    /// Item became ready to play, with the item's duration if already known
    ReadyToPlay {
        /// Duration read from the item at readiness
        duration_secs: Option<f64>,
    },

    /// Item duration property changed (may fire several times)
    DurationChanged(f64),

    /// Asynchronous asset-metadata duration load finished
    DurationLoaded(std::result::Result<f64, String>),

    /// Item failed (bad data, network failure fetching the media)
    Failed(Option<String>),

    /// Periodic position observer fired
    PositionTick(f64),

    /// Item played to its end
    PlayedToEnd,

    /// A seek request finished
    SeekCompleted {
        /// Request this completion belongs to
        seek: SeekId,
        /// Whether the output actually reached the target
        completed: bool,
    },
}

/// An output event tagged with the generation of its media item
#[derive(Debug, Clone, PartialEq)]
pub struct OutputEvent {
    /// Generation of the item that produced the event
    pub generation: Generation,

    /// Event payload
    pub kind: OutputEventKind,
}

/// Sending half handed to an output for one attached media item
///
/// Cheap to clone and safe to move to whatever thread delivers the output's
/// callbacks. Sends never block; once the engine is gone they are dropped.
#[derive(Debug, Clone)]
pub struct EventSink {
    generation: Generation,
    tx: Sender<OutputEvent>,
}

impl EventSink {
    /// Create a sink that tags every event with `generation`
    pub fn new(generation: Generation, tx: Sender<OutputEvent>) -> Self {
        Self { generation, tx }
    }

    /// Generation this sink reports for
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Report readiness
    pub fn ready_to_play(&self, duration_secs: Option<f64>) -> bool {
        self.send(OutputEventKind::ReadyToPlay { duration_secs })
    }

    /// Report an item duration change
    pub fn duration_changed(&self, secs: f64) -> bool {
        self.send(OutputEventKind::DurationChanged(secs))
    }

    /// Report the result of the asset-metadata duration load
    pub fn duration_loaded(&self, result: std::result::Result<f64, String>) -> bool {
        self.send(OutputEventKind::DurationLoaded(result))
    }

    /// Report item failure
    pub fn failed(&self, description: Option<String>) -> bool {
        self.send(OutputEventKind::Failed(description))
    }

    /// Report a periodic position tick
    pub fn position_tick(&self, secs: f64) -> bool {
        self.send(OutputEventKind::PositionTick(secs))
    }

    /// Report end-of-item
    pub fn played_to_end(&self) -> bool {
        self.send(OutputEventKind::PlayedToEnd)
    }

    /// Report seek completion
    pub fn seek_completed(&self, seek: SeekId, completed: bool) -> bool {
        self.send(OutputEventKind::SeekCompleted { seek, completed })
    }

    /// Returns false when the receiving engine no longer exists
    fn send(&self, kind: OutputEventKind) -> bool {
        self.tx
            .send(OutputEvent {
                generation: self.generation,
                kind,
            })
            .is_ok()
    }
}
