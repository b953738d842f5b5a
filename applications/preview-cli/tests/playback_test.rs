//! End-to-end playback against the simulated output

use preview_cli::{driver, PlayOptions, SimulatedOutput, SimulatedSession, SimulationSettings};
use preview_core::Track;
use preview_playback::{
    EngineConfig, EngineDependencies, PlaybackEngine, PlaybackState, PlayerEvent,
};
use std::time::Duration;

// ===== Helpers =====

fn create_test_track(id: i64) -> Track {
    Track::new(id, format!("Song {id}"))
        .with_artist(format!("Artist {id}"))
        .with_preview_url(format!("https://audio.example.com/{id}.m4a"))
}

fn fast_settings() -> SimulationSettings {
    SimulationSettings {
        speed: 20.0,
        preview_length_secs: 1.0,
        load_delay_ms: 0,
    }
}

fn create_engine(settings: SimulationSettings) -> PlaybackEngine {
    let output = SimulatedOutput::spawn(settings).unwrap();
    let deps = EngineDependencies::new(Box::new(output), Box::new(SimulatedSession::default()));
    PlaybackEngine::new(deps, EngineConfig::default())
}

// ===== Playback =====

#[test]
fn plays_through_playlist_then_stops() {
    let tracks = vec![create_test_track(1), create_test_track(2)];
    let mut engine = create_engine(fast_settings());
    let mut events = Vec::new();

    let state = driver::run(&mut engine, &tracks, &PlayOptions::default(), |_, event| {
        events.push(event.clone());
    })
    .unwrap();

    assert_eq!(state, PlaybackState::Stopped);
    let played: Vec<i64> = events
        .iter()
        .filter_map(|e| match e {
            PlayerEvent::TrackChanged { track_id, .. } => Some(*track_id),
            _ => None,
        })
        .collect();
    assert_eq!(played, vec![1, 2]);
    assert!(events.contains(&PlayerEvent::DurationChanged { duration_ms: 1000 }));
    assert_eq!(engine.current_track().map(|t| t.id), Some(2));
    assert_eq!(engine.current_time(), Duration::ZERO);
    assert!(!engine.is_playing());
}

#[test]
fn starts_at_requested_track() {
    let tracks = vec![create_test_track(1), create_test_track(2)];
    let mut engine = create_engine(fast_settings());
    let options = PlayOptions {
        track: Some(2),
        ..PlayOptions::default()
    };
    let mut first = None;

    driver::run(&mut engine, &tracks, &options, |_, event| {
        if let PlayerEvent::TrackChanged { track_id, .. } = event {
            first.get_or_insert(*track_id);
        }
    })
    .unwrap();

    assert_eq!(first, Some(2));
}

#[test]
fn start_position_is_applied_once() {
    let tracks = vec![create_test_track(1)];
    let mut engine = create_engine(SimulationSettings {
        speed: 4.0,
        ..fast_settings()
    });
    let options = PlayOptions {
        start_at: Some(Duration::from_millis(800)),
        ..PlayOptions::default()
    };
    let mut positions = Vec::new();

    let state = driver::run(&mut engine, &tracks, &options, |_, event| {
        if let PlayerEvent::PositionChanged { position_ms } = event {
            positions.push(*position_ms);
        }
    })
    .unwrap();

    assert_eq!(state, PlaybackState::Stopped);
    let seeked = positions
        .iter()
        .position(|&p| p == 800)
        .expect("start position was never displayed");
    assert!(positions[seeked..].iter().all(|&p| p >= 800 || p == 0));
}

#[test]
fn unsupported_media_ends_in_error() {
    let tracks = vec![Track::new(9, "Local").with_preview_url("file:///tmp/preview.m4a")];
    let mut engine = create_engine(fast_settings());
    let mut errors = Vec::new();

    let state = driver::run(&mut engine, &tracks, &PlayOptions::default(), |_, event| {
        if let PlayerEvent::Error { message } = event {
            errors.push(message.clone());
        }
    })
    .unwrap();

    assert_eq!(state, PlaybackState::Error);
    assert_eq!(errors, vec!["Unsupported URL scheme: file".to_string()]);
    assert_eq!(
        engine.player_error().as_deref(),
        Some("Unsupported URL scheme: file")
    );
}

#[test]
fn unknown_start_track_is_rejected_before_playing() {
    let tracks = vec![create_test_track(1)];
    let mut engine = create_engine(fast_settings());
    let options = PlayOptions {
        track: Some(42),
        ..PlayOptions::default()
    };

    let result = driver::run(&mut engine, &tracks, &options, |_, _| {});

    assert!(result.is_err());
    assert_eq!(engine.state(), PlaybackState::Idle);
}

#[test]
fn position_label_follows_shuffled_order() {
    let tracks = vec![create_test_track(1), create_test_track(2), create_test_track(3)];
    let mut engine = create_engine(fast_settings());
    engine.play(&tracks[2], &tracks).unwrap();
    assert_eq!(driver::track_position_label(&engine), "[3/3]");

    engine.toggle_shuffle();
    assert_eq!(driver::track_position_label(&engine), "[1/3]");

    engine.next().unwrap();
    assert_eq!(driver::track_position_label(&engine), "[2/3]");
}
