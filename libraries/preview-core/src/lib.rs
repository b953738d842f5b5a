//! Preview Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Preview Player.
//!
//! This crate provides the building blocks shared by the playback engine and
//! by every platform that hosts it.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, artwork URL helpers, audio session settings
//! - **Core Traits**: `AudioOutput`, `AudioSession`
//! - **Output Events**: the single typed channel through which an output
//!   reports readiness, duration, position ticks, end-of-item and seek
//!   completion back to the control thread
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use preview_core::types::{large_artwork_url, Track};
//!
//! let track = Track::new(42, "In the End")
//!     .with_artist("LINKIN PARK")
//!     .with_preview_url("https://audio.example.com/preview.m4a");
//!
//! assert!(track.is_playable());
//! assert_eq!(
//!     large_artwork_url("https://img.example.com/art/100x100bb.jpg"),
//!     "https://img.example.com/art/400x400bb.jpg"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use events::{EventSink, Generation, ObserverHandle, OutputEvent, OutputEventKind, SeekId};
pub use traits::{AudioOutput, AudioSession, MediaItem};
pub use types::{
    large_artwork_url, SessionCategory, SessionMode, SessionOption, SessionSettings, Track,
    TrackId,
};
