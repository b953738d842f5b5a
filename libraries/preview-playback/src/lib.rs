//! Preview Player - Playback Engine
//!
//! Platform-agnostic playback engine for short catalog previews.
//!
//! This crate provides:
//! - Audio session gate (one-time category/activation setup)
//! - Position tracking with interactive seek arbitration
//! - Playlist navigation (sequential, shuffled, repeating)
//! - The playback engine state machine
//! - A read-only observer for secondary UI surfaces
//!
//! # Architecture
//!
//! `preview-playback` owns no platform resources. The real audio output and
//! audio session are provided through the [`AudioOutput`] and
//! [`AudioSession`] traits from `preview-core`. The output reports readiness,
//! duration, position ticks, end-of-item and seek completion through an
//! [`EventSink`]; the engine owner drains those with
//! [`PlaybackEngine::process_events`] on its own thread.
//!
//! # Example
//!
//! ```rust
//! use preview_core::{
//!     AudioOutput, AudioSession, EventSink, MediaItem, ObserverHandle, SeekId, SessionCategory,
//!     SessionMode, SessionOption, Track,
//! };
//! use preview_playback::{EngineConfig, EngineDependencies, PlaybackEngine, PlaybackState};
//! use std::time::Duration;
//!
//! struct SilentOutput;
//!
//! impl AudioOutput for SilentOutput {
//!     fn attach(&mut self, _item: MediaItem, sink: EventSink) {
//!         sink.ready_to_play(Some(30.0));
//!     }
//!     fn detach(&mut self) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: Duration, seek: SeekId, sink: EventSink) {
//!         sink.seek_completed(seek, true);
//!     }
//!     fn load_duration(&mut self, sink: EventSink) {
//!         sink.duration_loaded(Ok(30.0));
//!     }
//!     fn add_periodic_position_observer(&mut self, _: Duration, _: EventSink) -> ObserverHandle {
//!         ObserverHandle::new(1)
//!     }
//!     fn remove_observer(&mut self, _handle: ObserverHandle) {}
//! }
//!
//! struct NoopSession;
//!
//! impl AudioSession for NoopSession {
//!     fn set_category(
//!         &mut self,
//!         _: SessionCategory,
//!         _: SessionMode,
//!         _: &[SessionOption],
//!     ) -> preview_core::Result<()> {
//!         Ok(())
//!     }
//!     fn set_active(&mut self, _: bool) -> preview_core::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let deps = EngineDependencies::new(Box::new(SilentOutput), Box::new(NoopSession));
//! let mut engine = PlaybackEngine::new(deps, EngineConfig::default());
//!
//! let tracks = vec![
//!     Track::new(1, "Papercut").with_preview_url("https://audio.example.com/1.m4a"),
//!     Track::new(2, "One Step Closer").with_preview_url("https://audio.example.com/2.m4a"),
//! ];
//! engine.play(&tracks[0], &tracks).unwrap();
//! assert_eq!(engine.state(), PlaybackState::Loading);
//!
//! engine.process_events();
//! assert_eq!(engine.state(), PlaybackState::Playing);
//! assert_eq!(engine.duration(), Duration::from_secs(30));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
pub mod events;
mod navigator;
pub mod observer;
mod position;
mod session;
mod shuffle;
pub mod time_format;
pub mod types;

// Public exports
pub use engine::{EngineDependencies, PlaybackEngine, NO_SONG_TITLE, UNKNOWN_ARTIST};
pub use error::{PlaybackError, Result, UNKNOWN_PLAYER_ERROR};
pub use events::PlayerEvent;
pub use navigator::PlaylistNavigator;
pub use observer::{PlayerObserver, PlayerSnapshot};
pub use position::PositionTracker;
pub use session::AudioSessionGate;
pub use shuffle::shuffled_order;
pub use time_format::{DefaultTimeFormatter, TimeFormatter};
pub use types::{EngineConfig, PlaybackState};

pub use preview_core::{AudioOutput, AudioSession, EventSink, OutputEvent, OutputEventKind};
