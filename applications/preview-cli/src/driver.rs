//! Terminal playback driver
//!
//! Owns the control loop: starts the requested track, drains output events
//! into the engine and hands every UI event to the caller until playback
//! rests in `Stopped` or `Error`.

use crate::error::{CliError, Result};
use preview_core::{Track, TrackId};
use preview_playback::{PlaybackEngine, PlaybackState, PlayerEvent};
use std::time::Duration;
use tracing::{debug, info};

/// How long one loop iteration waits for output events
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Track to start with; the first playable track when `None`
    pub track: Option<TrackId>,

    /// Position to seek to once the first track is playing
    pub start_at: Option<Duration>,

    pub poll_interval: Duration,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            track: None,
            start_at: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Parse a `--start-at` value in seconds
pub fn parse_start_at(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| CliError::InvalidStartPosition(secs))
}

/// Pick the track playback starts with
pub fn select_start_track(tracks: &[Track], requested: Option<TrackId>) -> Result<&Track> {
    match requested {
        Some(id) => tracks
            .iter()
            .find(|t| t.id == id)
            .ok_or(CliError::TrackNotInPlaylist(id)),
        None => tracks
            .iter()
            .find(|t| t.is_playable())
            .ok_or(CliError::NoPlayableTrack),
    }
}

/// `[n/total]` position of the current track in the order being played
pub fn track_position_label(engine: &PlaybackEngine) -> String {
    format!("[{}/{}]", engine.active_index() + 1, engine.playlist().len())
}

/// Play `tracks` until playback stops or fails
///
/// Returns the state playback rested in. A rejected start is returned as an
/// error after its event has been reported.
pub fn run<F>(
    engine: &mut PlaybackEngine,
    tracks: &[Track],
    options: &PlayOptions,
    mut on_event: F,
) -> anyhow::Result<PlaybackState>
where
    F: FnMut(&PlaybackEngine, &PlayerEvent),
{
    let start = select_start_track(tracks, options.track)?;
    info!(track_id = start.id, tracks = tracks.len(), "starting playback");

    let started = engine.play(start, tracks);
    for event in engine.drain_events() {
        on_event(engine, &event);
    }
    started?;

    let mut pending_start = options.start_at;
    loop {
        engine.process_events_timeout(options.poll_interval);
        for event in engine.drain_events() {
            on_event(engine, &event);
        }

        let state = engine.state();
        if state == PlaybackState::Playing {
            if let Some(position) = pending_start.take() {
                debug!(position_ms = position.as_millis() as u64, "applying start position");
                engine.set_slider_value(position);
                engine.finish_seeking()?;
            }
        }

        if matches!(state, PlaybackState::Stopped | PlaybackState::Error) {
            info!(?state, "playback finished");
            return Ok(state);
        }
    }
}
