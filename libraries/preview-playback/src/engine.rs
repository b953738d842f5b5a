//! Playback engine - core orchestration
//!
//! Wires the session gate, position tracker and playlist navigator to the
//! audio output. All state lives on the control thread that owns the engine;
//! the output reports back through one typed channel that the owner drains
//! with [`PlaybackEngine::process_events`].
//!
//! Every attached media item gets a fresh [`Generation`]. Output events carry
//! the generation of the item that produced them and are discarded unless it
//! matches the currently attached item, so a superseded load can never touch
//! the state of its replacement.

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    navigator::PlaylistNavigator,
    observer::{PlayerObserver, PlayerSnapshot},
    position::PositionTracker,
    session::AudioSessionGate,
    time_format::{DefaultTimeFormatter, TimeFormatter},
    types::{EngineConfig, PlaybackState},
};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use preview_core::{
    large_artwork_url, AudioOutput, AudioSession, EventSink, Generation, MediaItem,
    ObserverHandle, OutputEvent, OutputEventKind, SeekId, Track, TrackId,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// Title shown when nothing is loaded
pub const NO_SONG_TITLE: &str = "No song playing";

/// Artist shown when nothing is loaded
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Collaborators injected into the engine
pub struct EngineDependencies {
    /// Real audio output
    pub output: Box<dyn AudioOutput>,

    /// Shared device audio session
    pub session: Box<dyn AudioSession>,

    /// Formatter behind `formatted_current_time` / `formatted_duration`
    pub time_formatter: Box<dyn TimeFormatter>,

    /// Random source for the shuffle projection
    pub rng: Box<dyn RngCore + Send>,
}

impl EngineDependencies {
    /// Dependencies with the default formatter and an entropy-seeded RNG
    pub fn new(output: Box<dyn AudioOutput>, session: Box<dyn AudioSession>) -> Self {
        Self {
            output,
            session,
            time_formatter: Box::new(DefaultTimeFormatter),
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replace the time formatter
    #[must_use]
    pub fn with_time_formatter(mut self, time_formatter: Box<dyn TimeFormatter>) -> Self {
        self.time_formatter = time_formatter;
        self
    }

    /// Replace the random source
    #[must_use]
    pub fn with_rng(mut self, rng: Box<dyn RngCore + Send>) -> Self {
        self.rng = rng;
        self
    }
}

/// The item currently attached to the output
#[derive(Debug)]
struct Attachment {
    generation: Generation,
    track_id: TrackId,
    observer: Option<ObserverHandle>,
    failed: bool,
}

/// Seek issued by `finish_seeking` and not yet acknowledged
#[derive(Debug, Clone, Copy)]
struct PendingSeek {
    id: SeekId,
    target: Duration,
}

/// Preview playback engine
///
/// Single owner, single writer. Other UI surfaces observe through
/// [`PlaybackEngine::observer`].
pub struct PlaybackEngine {
    output: Box<dyn AudioOutput>,
    session: Box<dyn AudioSession>,
    time_formatter: Box<dyn TimeFormatter>,
    config: EngineConfig,

    navigator: PlaylistNavigator,
    position: PositionTracker,

    // Playback session
    attached: Option<Attachment>,
    generation: Generation,
    is_playing: bool,
    is_loading: bool,
    stopped: bool,
    player_error: Option<PlaybackError>,

    // Seeks
    next_seek: u64,
    pending_seek: Option<PendingSeek>,

    // Output event channel
    events_tx: Sender<OutputEvent>,
    events_rx: Receiver<OutputEvent>,

    // UI synchronization
    playlist_view: Arc<Vec<Track>>,
    shuffled_view: Arc<Vec<Track>>,
    pending_events: Vec<PlayerEvent>,
    observer: PlayerObserver,
    last_state: PlaybackState,
}

impl PlaybackEngine {
    /// Create the engine and run the audio session gate once
    ///
    /// A session failure is not fatal: it is surfaced as `player_error` and
    /// playback is still attempted on later commands.
    pub fn new(deps: EngineDependencies, config: EngineConfig) -> Self {
        let EngineDependencies {
            output,
            mut session,
            time_formatter,
            rng,
        } = deps;

        let session_result = AudioSessionGate::new(config.session.clone()).activate(session.as_mut());

        let mut navigator = PlaylistNavigator::new(rng);
        navigator.set_repeat(config.repeat);
        if config.shuffle {
            navigator.toggle_shuffle();
        }

        let (events_tx, events_rx) = unbounded();

        let mut engine = Self {
            output,
            session,
            time_formatter,
            config,
            navigator,
            position: PositionTracker::new(),
            attached: None,
            generation: Generation::default(),
            is_playing: false,
            is_loading: false,
            stopped: false,
            player_error: None,
            next_seek: 0,
            pending_seek: None,
            events_tx,
            events_rx,
            playlist_view: Arc::default(),
            shuffled_view: Arc::default(),
            pending_events: Vec::new(),
            observer: PlayerObserver::new(),
            last_state: PlaybackState::Idle,
        };

        if let Err(e) = session_result {
            engine.surface(e);
        } else {
            engine.publish();
        }
        engine
    }

    // ===== Playback Control =====

    /// Load `tracks` as the playlist and start playing `track`
    ///
    /// Fails without touching the current session if `track` is not in
    /// `tracks` or has no usable preview URL; the error is also surfaced as
    /// `player_error`. Returns as soon as the output has been told to play.
    pub fn play(&mut self, track: &Track, tracks: &[Track]) -> Result<()> {
        if let Err(e) = self.navigator.load(tracks, track.id) {
            warn!(track_id = track.id, error = %e, "play rejected");
            return Err(self.surface(e));
        }
        self.refresh_playlist_views();
        self.load_and_play_current()
    }

    /// Advance to the next track and play it
    ///
    /// Returns `Ok(false)` without side effects when there is no next track.
    pub fn next(&mut self) -> Result<bool> {
        if !self.navigator.has_next() {
            return Ok(false);
        }
        self.navigator.next();
        self.load_and_play_current()?;
        Ok(true)
    }

    /// Go back to the previous track and play it
    ///
    /// Returns `Ok(false)` without side effects when there is no previous track.
    pub fn previous(&mut self) -> Result<bool> {
        if !self.navigator.has_previous() {
            return Ok(false);
        }
        self.navigator.previous();
        self.load_and_play_current()?;
        Ok(true)
    }

    /// Pause or resume the attached item
    ///
    /// Mirrors `is_playing` only; `is_loading` is never touched. A failed
    /// item counts as nothing loaded.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if !self.attached.as_ref().is_some_and(|a| !a.failed) {
            return Err(PlaybackError::NoTrackLoaded);
        }

        if self.is_playing {
            self.output.pause();
            self.is_playing = false;
        } else {
            self.output.play();
            self.is_playing = true;
            self.stopped = false;
        }

        debug!(playing = self.is_playing, "play/pause toggled");
        self.publish();
        Ok(())
    }

    /// Pause and rewind to zero
    ///
    /// Abandons any drag or unacknowledged seek. The rewind seek is
    /// fire-and-forget; its completion is ignored.
    pub fn stop(&mut self) {
        if self.pending_seek.take().is_some() || self.position.is_seeking() {
            debug!("stop abandons in-progress seek");
        }
        self.position.complete_seek(None);

        if let Some(generation) = self.attached.as_ref().map(|a| a.generation) {
            self.output.pause();
            let seek = self.allocate_seek_id();
            let sink = self.sink(generation);
            self.output.seek(Duration::ZERO, seek, sink);
            self.stopped = true;
        }

        self.position.reset_position();
        self.is_playing = false;
        info!("playback stopped");
        self.emit_position_changed();
        self.publish();
    }

    // ===== Shuffle / Repeat =====

    /// Flip shuffle; the current track keeps playing
    pub fn toggle_shuffle(&mut self) -> bool {
        let enabled = self.navigator.toggle_shuffle();
        self.refresh_playlist_views();
        self.pending_events
            .push(PlayerEvent::ShuffleChanged { enabled });
        self.publish();
        enabled
    }

    /// Flip repeat
    pub fn toggle_repeat(&mut self) -> bool {
        let enabled = !self.navigator.is_repeat_on();
        self.set_repeat(enabled);
        enabled
    }

    /// Set repeat
    pub fn set_repeat(&mut self, enabled: bool) {
        if self.navigator.is_repeat_on() == enabled {
            return;
        }
        self.navigator.set_repeat(enabled);
        debug!(repeat = enabled, "repeat changed");
        self.pending_events
            .push(PlayerEvent::RepeatChanged { enabled });
        self.publish();
    }

    // ===== Seeking =====

    /// Slider-bound position: the seek buffer while seeking, else live
    pub fn slider_value(&self) -> Duration {
        self.position.displayed_position()
    }

    /// Move the slider, entering seek mode if not already seeking
    ///
    /// Live ticks no longer move the displayed position until the seek
    /// finishes.
    pub fn set_slider_value(&mut self, position: Duration) {
        self.position.set_interactive_seek_value(position);
        self.emit_position_changed();
        self.publish();
    }

    /// Commit the seek buffer to the output
    ///
    /// The buffer stays displayed until the output acknowledges the seek; a
    /// completed seek then moves the live position to the target, a failed
    /// one leaves it where it was. Without an attached item the seek is
    /// abandoned immediately.
    pub fn finish_seeking(&mut self) -> Result<()> {
        let target = self
            .position
            .commit_seek()
            .ok_or(PlaybackError::NoSeekInProgress)?;

        match self.attached.as_ref().map(|a| a.generation) {
            Some(generation) => {
                let id = self.allocate_seek_id();
                let sink = self.sink(generation);
                self.pending_seek = Some(PendingSeek { id, target });
                debug!(seek = id.value(), target_ms = target.as_millis() as u64, "seek issued");
                self.output.seek(target, id, sink);
            }
            None => {
                debug!("no item attached, abandoning seek");
                self.position.complete_seek(None);
                self.emit_position_changed();
                self.publish();
            }
        }
        Ok(())
    }

    // ===== Output Events =====

    /// Apply every queued output event; returns how many were applied
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.handle_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait up to `timeout` for an output event, then apply everything queued
    pub fn process_events_timeout(&mut self, timeout: Duration) -> usize {
        match self.events_rx.recv_timeout(timeout) {
            Ok(event) => usize::from(self.handle_event(event)) + self.process_events(),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Apply one output event
    ///
    /// Returns false if the event belongs to a superseded item and was
    /// discarded.
    pub fn handle_event(&mut self, event: OutputEvent) -> bool {
        let current = self.attached.as_ref().map(|a| a.generation);
        if current != Some(event.generation) {
            debug!(
                event_generation = %event.generation,
                current_generation = ?current.map(Generation::value),
                kind = ?event.kind,
                "discarding event from superseded item"
            );
            return false;
        }

        match event.kind {
            OutputEventKind::ReadyToPlay { duration_secs } => self.handle_ready(duration_secs),
            OutputEventKind::DurationChanged(secs) => self.record_duration(secs),
            OutputEventKind::DurationLoaded(Ok(secs)) => self.record_duration(secs),
            OutputEventKind::DurationLoaded(Err(reason)) => {
                warn!(%reason, "failed to load asset duration");
            }
            OutputEventKind::Failed(description) => self.handle_failed(description),
            OutputEventKind::PositionTick(secs) => {
                if self.position.observe_tick(secs) {
                    self.emit_position_changed();
                }
            }
            OutputEventKind::PlayedToEnd => self.handle_played_to_end(),
            OutputEventKind::SeekCompleted { seek, completed } => {
                self.handle_seek_completed(seek, completed);
            }
        }

        self.publish();
        true
    }

    fn handle_ready(&mut self, duration_secs: Option<f64>) {
        self.is_loading = false;
        if let Some(secs) = duration_secs {
            self.record_duration(secs);
        }
        info!(generation = %self.generation, "item ready to play");

        let sink = self.sink(self.generation);
        self.output.load_duration(sink);
    }

    fn record_duration(&mut self, secs: f64) {
        if self.position.record_duration(secs) {
            self.pending_events.push(PlayerEvent::DurationChanged {
                duration_ms: self.position.duration().as_millis() as u64,
            });
        }
    }

    fn handle_failed(&mut self, description: Option<String>) {
        self.is_loading = false;
        self.is_playing = false;
        if let Some(attachment) = self.attached.as_mut() {
            attachment.failed = true;
        }
        let e = PlaybackError::Media(description);
        error!(generation = %self.generation, error = %e, "player item failed");
        self.surface(e);
    }

    fn handle_played_to_end(&mut self) {
        self.is_playing = false;
        self.position.reset_position();
        info!(generation = %self.generation, "item played to end");

        if self.navigator.has_next() {
            if let Err(e) = self.next() {
                warn!(error = %e, "failed to advance after end of item");
            }
        } else {
            self.stop();
        }
    }

    fn handle_seek_completed(&mut self, seek: SeekId, completed: bool) {
        match self.pending_seek {
            Some(pending) if pending.id == seek => {
                self.pending_seek = None;
                self.position.complete_seek(completed.then_some(pending.target));
                if completed {
                    debug!(seek = seek.value(), "seek completed");
                } else {
                    warn!(seek = seek.value(), "seek did not complete");
                }
                self.emit_position_changed();
            }
            _ => debug!(seek = seek.value(), "ignoring completion of unawaited seek"),
        }
    }

    // ===== Session Lifecycle =====

    /// Tear down, attach the navigator's current track and start it
    fn load_and_play_current(&mut self) -> Result<()> {
        let Some(track) = self.navigator.current_track().cloned() else {
            return Err(PlaybackError::NoTrackLoaded);
        };
        let Ok(url) = track.preview_url() else {
            return Err(self.surface(PlaybackError::InvalidPreviewUrl(track.id)));
        };

        let previous_track_id = self.attached.as_ref().map(|a| a.track_id);
        self.teardown();

        self.generation = self.generation.next();
        let generation = self.generation;

        self.position.reset();
        self.pending_seek = None;
        self.is_loading = true;
        self.stopped = false;
        self.player_error = None;

        let item = MediaItem {
            track_id: track.id,
            url,
            generation,
        };
        let sink = self.sink(generation);
        self.output.attach(item, sink.clone());
        let handle = self
            .output
            .add_periodic_position_observer(self.config.tick_interval(), sink);
        self.attached = Some(Attachment {
            generation,
            track_id: track.id,
            observer: Some(handle),
            failed: false,
        });

        self.output.play();
        self.is_playing = true;

        info!(
            track_id = track.id,
            title = %track.title,
            generation = %generation,
            "loading track"
        );
        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id: track.id,
            previous_track_id,
        });
        self.publish();
        Ok(())
    }

    /// Detach the position observer, pause and release the current item
    fn teardown(&mut self) {
        let Some(attachment) = self.attached.take() else {
            return;
        };

        if let Some(handle) = attachment.observer {
            self.output.remove_observer(handle);
        }
        self.output.pause();
        self.output.detach();
        self.is_loading = false;

        debug!(generation = %attachment.generation, "session torn down");
    }

    /// Rebuild the shared list copies handed to observers
    ///
    /// Only loading a playlist and toggling shuffle change the lists; every
    /// other publish reuses these allocations.
    fn refresh_playlist_views(&mut self) {
        self.playlist_view = Arc::new(self.navigator.playlist().to_vec());
        self.shuffled_view = Arc::new(
            self.navigator
                .shuffled_playlist()
                .into_iter()
                .cloned()
                .collect(),
        );
    }

    fn sink(&self, generation: Generation) -> EventSink {
        EventSink::new(generation, self.events_tx.clone())
    }

    fn allocate_seek_id(&mut self) -> SeekId {
        self.next_seek += 1;
        SeekId::new(self.next_seek)
    }

    // ===== State =====

    /// Observable playback state derived from the session flags
    pub fn state(&self) -> PlaybackState {
        match &self.attached {
            None => PlaybackState::Idle,
            Some(attachment) if attachment.failed => PlaybackState::Error,
            Some(_) if self.is_loading => PlaybackState::Loading,
            Some(_) if self.is_playing => PlaybackState::Playing,
            Some(_) if self.stopped => PlaybackState::Stopped,
            Some(_) => PlaybackState::Paused,
        }
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.navigator.current_track()
    }

    /// Playable playlist in caller order
    pub fn playlist(&self) -> &[Track] {
        self.navigator.playlist()
    }

    /// Shuffled projection (empty when shuffle is off)
    pub fn shuffled_playlist(&self) -> Vec<&Track> {
        self.navigator.shuffled_playlist()
    }

    /// Cursor into the linear playlist
    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    /// Cursor into the shuffled projection
    pub fn current_shuffled_index(&self) -> usize {
        self.navigator.current_shuffled_index()
    }

    /// Cursor of whichever order is active (shuffled while shuffle is on)
    pub fn active_index(&self) -> usize {
        self.navigator.active_index()
    }

    /// Playback intent
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Waiting for the output to become ready
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Shuffle flag
    pub fn is_shuffle_on(&self) -> bool {
        self.navigator.is_shuffle_on()
    }

    /// Repeat flag
    pub fn is_repeat_on(&self) -> bool {
        self.navigator.is_repeat_on()
    }

    /// Whether `next` would do anything
    pub fn has_next(&self) -> bool {
        self.navigator.has_next()
    }

    /// Whether `previous` would do anything
    pub fn has_previous(&self) -> bool {
        self.navigator.has_previous()
    }

    /// Displayed position
    pub fn current_time(&self) -> Duration {
        self.position.displayed_position()
    }

    /// Known duration (zero until discovered)
    pub fn duration(&self) -> Duration {
        self.position.duration()
    }

    /// Displayed position over duration; 0 when the duration is zero
    pub fn progress(&self) -> f64 {
        self.position.progress()
    }

    /// Interactive seek in progress
    pub fn is_seek_in_progress(&self) -> bool {
        self.position.is_seeking()
    }

    /// Last surfaced user-visible error message
    pub fn player_error(&self) -> Option<String> {
        self.player_error.as_ref().map(ToString::to_string)
    }

    /// Last surfaced user-visible error
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.player_error.as_ref()
    }

    /// Generation of the currently attached item
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ===== Display =====

    /// Current title, or a placeholder when nothing is loaded
    pub fn song_title(&self) -> &str {
        self.current_track().map_or(NO_SONG_TITLE, |t| t.title.as_str())
    }

    /// Current artist, or a placeholder when nothing is loaded
    pub fn artist_name(&self) -> &str {
        self.current_track()
            .map_or(UNKNOWN_ARTIST, |t| t.artist_name.as_str())
    }

    /// 60x60 artwork
    pub fn small_artwork_url(&self) -> Option<Url> {
        self.current_track()
            .and_then(|t| Url::parse(&t.artwork_url60).ok())
    }

    /// 100x100 artwork
    pub fn standard_artwork_url(&self) -> Option<Url> {
        self.current_track()
            .and_then(|t| Url::parse(&t.artwork_url100).ok())
    }

    /// 400x400 artwork derived from the 100x100 URL
    pub fn large_artwork_url(&self) -> Option<Url> {
        self.current_track()
            .and_then(|t| Url::parse(&large_artwork_url(&t.artwork_url100)).ok())
    }

    /// Displayed position through the time formatter
    pub fn formatted_current_time(&self) -> String {
        self.time_formatter
            .format(self.position.displayed_position().as_secs_f64())
    }

    /// Duration through the time formatter
    pub fn formatted_duration(&self) -> String {
        self.time_formatter
            .format(self.position.duration().as_secs_f64())
    }

    // ===== Events =====

    /// Read-only handle for other UI surfaces
    pub fn observer(&self) -> PlayerObserver {
        self.observer.clone()
    }

    /// Drain all pending UI events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending UI events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Record a user-visible error, then publish
    fn surface(&mut self, e: PlaybackError) -> PlaybackError {
        if e.is_user_visible() {
            self.pending_events.push(PlayerEvent::Error {
                message: e.to_string(),
            });
            self.player_error = Some(e.clone());
        }
        self.publish();
        e
    }

    fn emit_position_changed(&mut self) {
        self.pending_events.push(PlayerEvent::PositionChanged {
            position_ms: self.position.displayed_position().as_millis() as u64,
        });
    }

    /// Emit a state change if needed and republish the observer snapshot
    fn publish(&mut self) {
        let state = self.state();
        if state != self.last_state {
            debug!(from = ?self.last_state, to = ?state, "state changed");
            self.last_state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }

        self.observer.publish(PlayerSnapshot {
            state,
            playlist: Arc::clone(&self.playlist_view),
            shuffled_playlist: Arc::clone(&self.shuffled_view),
            current_index: self.navigator.current_index(),
            current_shuffled_index: self.navigator.current_shuffled_index(),
            current_track: self.navigator.current_track().cloned(),
            is_playing: self.is_playing,
            is_loading: self.is_loading,
            is_shuffle_on: self.navigator.is_shuffle_on(),
            is_repeat_on: self.navigator.is_repeat_on(),
            current_time: self.position.displayed_position(),
            duration: self.position.duration(),
            progress: self.position.progress(),
            is_seek_in_progress: self.position.is_seeking(),
            player_error: self.player_error(),
            has_next: self.navigator.has_next(),
            has_previous: self.navigator.has_previous(),
        });
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PlaybackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("state", &self.state())
            .field("generation", &self.generation)
            .field("navigator", &self.navigator)
            .field("position", &self.position)
            .field("is_playing", &self.is_playing)
            .field("is_loading", &self.is_loading)
            .field("player_error", &self.player_error)
            .finish_non_exhaustive()
    }
}
