//! Preview Player command-line driver
//!
//! Runs the playback engine against a simulated audio output so playlists
//! can be played, shuffled and inspected from a terminal.

pub mod config;
pub mod driver;
pub mod error;
pub mod playlist;
pub mod simulated;

pub use config::{CliConfig, SimulationSettings};
pub use driver::{run, PlayOptions};
pub use error::{CliError, Result};
pub use playlist::{load_playlist, parse_playlist};
pub use simulated::{SimulatedOutput, SimulatedSession};
