//! Domain types for Preview Player

mod artwork;
mod session;
mod track;

pub use artwork::large_artwork_url;
pub use session::{SessionCategory, SessionMode, SessionOption, SessionSettings};
pub use track::{Track, TrackId};
