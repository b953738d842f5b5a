/// Core traits for Preview Player
use crate::error::Result;
use crate::events::{EventSink, Generation, ObserverHandle, SeekId};
use crate::types::{SessionCategory, SessionMode, SessionOption, TrackId};
use std::time::Duration;
use url::Url;

/// Media reference handed to an output when a track is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Track the media belongs to
    pub track_id: TrackId,

    /// Resolved preview URL
    pub url: Url,

    /// Generation of this attachment
    pub generation: Generation,
}

/// Audio output trait
///
/// Implementers own the real playback resource. Every method returns
/// immediately; results arrive later through the [`EventSink`] the engine
/// passes in, and may be delivered from any thread.
pub trait AudioOutput: Send {
    /// Replace the current item with `item`
    ///
    /// Readiness, duration changes, failure and end-of-item for this item are
    /// reported through `sink`.
    fn attach(&mut self, item: MediaItem, sink: EventSink);

    /// Release the current item, if any
    fn detach(&mut self);

    /// Start or resume producing audio (buffers first if the item is not ready)
    fn play(&mut self);

    /// Pause audio production
    fn pause(&mut self);

    /// Seek the current item; completion is reported as `seek` through `sink`
    fn seek(&mut self, position: Duration, seek: SeekId, sink: EventSink);

    /// Start the asynchronous asset-metadata duration load for the current item
    fn load_duration(&mut self, sink: EventSink);

    /// Register a periodic position observer firing roughly every `interval`
    fn add_periodic_position_observer(
        &mut self,
        interval: Duration,
        sink: EventSink,
    ) -> ObserverHandle;

    /// Remove an observer returned by `add_periodic_position_observer`
    fn remove_observer(&mut self, handle: ObserverHandle);
}

/// Shared device audio session
///
/// Both calls may fail with an implementation-defined error.
pub trait AudioSession: Send {
    /// Configure category, mode and options
    ///
    /// # Errors
    /// Returns an error if the platform rejects the configuration
    fn set_category(
        &mut self,
        category: SessionCategory,
        mode: SessionMode,
        options: &[SessionOption],
    ) -> Result<()>;

    /// Activate or deactivate the session
    ///
    /// # Errors
    /// Returns an error if the platform refuses the activation change
    fn set_active(&mut self, active: bool) -> Result<()>;
}
