//! Shared test doubles for the playback engine
//!
//! Each mock is split into the half handed to the engine and a cloneable
//! probe the test keeps to inspect calls and to drive output callbacks.

#![allow(dead_code)]

use preview_core::{
    AudioOutput, AudioSession, CoreError, EventSink, MediaItem, ObserverHandle, SeekId,
    SessionCategory, SessionMode, SessionOption, Track, TrackId,
};
use preview_playback::{EngineConfig, EngineDependencies, PlaybackEngine, TimeFormatter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

// ===== Tracks =====

pub fn create_test_track(id: TrackId) -> Track {
    Track::new(id, format!("Song {}", id))
        .with_artist("Test Artist")
        .with_artwork(
            format!("https://img.example.com/{}/60x60bb.jpg", id),
            format!("https://img.example.com/{}/100x100bb.jpg", id),
        )
        .with_collection(100, "Test Album", Some(id as u32))
        .with_preview_url(format!("https://audio.example.com/{}.m4a", id))
}

pub fn create_test_tracks(ids: &[TrackId]) -> Vec<Track> {
    ids.iter().copied().map(create_test_track).collect()
}

// ===== Audio Output =====

#[derive(Default)]
pub struct OutputLog {
    pub attach_count: usize,
    pub detach_count: usize,
    pub play_count: usize,
    pub pause_count: usize,
    pub seek_count: usize,
    pub load_duration_count: usize,
    pub add_observer_count: usize,
    pub remove_observer_count: usize,
    pub attached: Vec<MediaItem>,
    pub seeks: Vec<(Duration, SeekId)>,
    pub removed_observers: Vec<ObserverHandle>,
    pub observer_interval: Option<Duration>,
    item_sinks: Vec<EventSink>,
    seek_sinks: Vec<(SeekId, EventSink)>,
    next_handle: u64,
}

pub struct MockOutput {
    log: Arc<Mutex<OutputLog>>,
}

#[derive(Clone)]
pub struct OutputProbe {
    log: Arc<Mutex<OutputLog>>,
}

impl MockOutput {
    pub fn new() -> (Self, OutputProbe) {
        let log = Arc::new(Mutex::new(OutputLog::default()));
        (
            Self { log: log.clone() },
            OutputProbe { log },
        )
    }

    fn log(&self) -> MutexGuard<'_, OutputLog> {
        self.log.lock().unwrap()
    }
}

impl AudioOutput for MockOutput {
    fn attach(&mut self, item: MediaItem, sink: EventSink) {
        let mut log = self.log();
        log.attach_count += 1;
        log.attached.push(item);
        log.item_sinks.push(sink);
    }

    fn detach(&mut self) {
        self.log().detach_count += 1;
    }

    fn play(&mut self) {
        self.log().play_count += 1;
    }

    fn pause(&mut self) {
        self.log().pause_count += 1;
    }

    fn seek(&mut self, position: Duration, seek: SeekId, sink: EventSink) {
        let mut log = self.log();
        log.seek_count += 1;
        log.seeks.push((position, seek));
        log.seek_sinks.push((seek, sink));
    }

    fn load_duration(&mut self, _sink: EventSink) {
        self.log().load_duration_count += 1;
    }

    fn add_periodic_position_observer(
        &mut self,
        interval: Duration,
        _sink: EventSink,
    ) -> ObserverHandle {
        let mut log = self.log();
        log.add_observer_count += 1;
        log.observer_interval = Some(interval);
        log.next_handle += 1;
        ObserverHandle::new(log.next_handle)
    }

    fn remove_observer(&mut self, handle: ObserverHandle) {
        let mut log = self.log();
        log.remove_observer_count += 1;
        log.removed_observers.push(handle);
    }
}

impl OutputProbe {
    pub fn log(&self) -> MutexGuard<'_, OutputLog> {
        self.log.lock().unwrap()
    }

    pub fn play_count(&self) -> usize {
        self.log().play_count
    }

    pub fn pause_count(&self) -> usize {
        self.log().pause_count
    }

    pub fn seek_count(&self) -> usize {
        self.log().seek_count
    }

    pub fn attach_count(&self) -> usize {
        self.log().attach_count
    }

    pub fn remove_observer_count(&self) -> usize {
        self.log().remove_observer_count
    }

    /// Sink of the most recently attached item
    pub fn current_sink(&self) -> EventSink {
        self.log()
            .item_sinks
            .last()
            .cloned()
            .expect("no item attached")
    }

    /// Sink of the `n`th attached item (0-based)
    pub fn sink_at(&self, n: usize) -> EventSink {
        self.log().item_sinks[n].clone()
    }

    pub fn last_seek(&self) -> (Duration, SeekId) {
        *self.log().seeks.last().expect("no seek issued")
    }

    pub fn simulate_ready(&self, duration_secs: Option<f64>) {
        self.current_sink().ready_to_play(duration_secs);
    }

    pub fn simulate_duration_loaded(&self, secs: f64) {
        self.current_sink().duration_loaded(Ok(secs));
    }

    pub fn simulate_time_update(&self, secs: f64) {
        self.current_sink().position_tick(secs);
    }

    pub fn simulate_played_to_end(&self) {
        self.current_sink().played_to_end();
    }

    pub fn simulate_failure(&self, description: Option<&str>) {
        self.current_sink().failed(description.map(str::to_string));
    }

    /// Complete the `n`th seek request (0-based)
    pub fn complete_seek_at(&self, n: usize, completed: bool) {
        let (seek, sink) = self.log().seek_sinks[n].clone();
        sink.seek_completed(seek, completed);
    }

    /// Complete the most recent seek request
    pub fn complete_last_seek(&self, completed: bool) {
        let (seek, sink) = self
            .log()
            .seek_sinks
            .last()
            .cloned()
            .expect("no seek issued");
        sink.seek_completed(seek, completed);
    }
}

// ===== Audio Session =====

#[derive(Default)]
pub struct SessionLog {
    pub set_category_count: usize,
    pub set_active_count: usize,
    pub last_category: Option<SessionCategory>,
    pub last_mode: Option<SessionMode>,
    pub last_options: Vec<SessionOption>,
    pub last_active: Option<bool>,
    pub should_fail: bool,
}

pub struct MockSession {
    log: Arc<Mutex<SessionLog>>,
}

impl MockSession {
    pub fn new(should_fail: bool) -> (Self, Arc<Mutex<SessionLog>>) {
        let log = Arc::new(Mutex::new(SessionLog {
            should_fail,
            ..Default::default()
        }));
        (Self { log: log.clone() }, log)
    }
}

impl AudioSession for MockSession {
    fn set_category(
        &mut self,
        category: SessionCategory,
        mode: SessionMode,
        options: &[SessionOption],
    ) -> preview_core::Result<()> {
        let mut log = self.log.lock().unwrap();
        log.set_category_count += 1;
        log.last_category = Some(category);
        log.last_mode = Some(mode);
        log.last_options = options.to_vec();
        if log.should_fail {
            return Err(CoreError::session("mock session failure"));
        }
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> preview_core::Result<()> {
        let mut log = self.log.lock().unwrap();
        log.set_active_count += 1;
        log.last_active = Some(active);
        if log.should_fail {
            return Err(CoreError::session("mock session failure"));
        }
        Ok(())
    }
}

// ===== Time Formatter =====

#[derive(Default)]
pub struct FormatterLog {
    pub format_count: usize,
    pub last_formatted: Option<f64>,
    pub return_value: String,
}

pub struct MockTimeFormatter {
    log: Arc<Mutex<FormatterLog>>,
}

impl TimeFormatter for MockTimeFormatter {
    fn format(&self, seconds: f64) -> String {
        let mut log = self.log.lock().unwrap();
        log.format_count += 1;
        log.last_formatted = Some(seconds);
        log.return_value.clone()
    }
}

// ===== Harness =====

pub struct Harness {
    pub output: OutputProbe,
    pub session: Arc<Mutex<SessionLog>>,
    pub formatter: Arc<Mutex<FormatterLog>>,
}

pub fn create_engine_with(config: EngineConfig, session_fails: bool) -> (PlaybackEngine, Harness) {
    let (output, output_probe) = MockOutput::new();
    let (session, session_log) = MockSession::new(session_fails);
    let formatter_log = Arc::new(Mutex::new(FormatterLog::default()));

    let deps = EngineDependencies::new(Box::new(output), Box::new(session))
        .with_time_formatter(Box::new(MockTimeFormatter {
            log: formatter_log.clone(),
        }))
        .with_rng(Box::new(StdRng::seed_from_u64(0x5eed)));

    let engine = PlaybackEngine::new(deps, config);
    (
        engine,
        Harness {
            output: output_probe,
            session: session_log,
            formatter: formatter_log,
        },
    )
}

pub fn create_engine() -> (PlaybackEngine, Harness) {
    create_engine_with(EngineConfig::default(), false)
}
