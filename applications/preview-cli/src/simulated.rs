//! Simulated audio output
//!
//! Stands in for a real media player so the engine can be driven from a
//! terminal. Commands are queued to a worker thread that runs a virtual
//! media clock and reports back through the engine's event sinks.
//!
//! ```text
//! Control Thread                  Output Thread
//!       │                              │
//!       │  attach / play / seek        │
//!       │─────────────────────────────>│ virtual clock (speed x wall time)
//!       │                              │
//!       │  OutputEvent via EventSink   │
//!       │<─────────────────────────────│ ready, ticks, seek done, end
//!       │                              │
//! ```

use crate::config::SimulationSettings;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use preview_core::{
    AudioOutput, AudioSession, EventSink, MediaItem, ObserverHandle, SeekId, SessionCategory,
    SessionMode, SessionOption,
};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Worker wake-up interval
const POLL_INTERVAL: Duration = Duration::from_millis(10);

enum Command {
    Attach { item: MediaItem, sink: EventSink },
    Detach,
    Play,
    Pause,
    Seek {
        position: Duration,
        seek: SeekId,
        sink: EventSink,
    },
    LoadDuration { sink: EventSink },
    AddObserver {
        handle: ObserverHandle,
        interval: Duration,
        sink: EventSink,
    },
    RemoveObserver(ObserverHandle),
    Shutdown,
}

/// Audio output backed by a virtual clock on a background thread
pub struct SimulatedOutput {
    command_tx: Sender<Command>,
    thread_handle: Option<JoinHandle<()>>,
    next_observer: u64,
}

impl SimulatedOutput {
    /// Spawn the output thread
    pub fn spawn(settings: SimulationSettings) -> std::io::Result<Self> {
        let (command_tx, command_rx) = unbounded();

        let thread_handle = thread::Builder::new()
            .name("simulated-output".to_string())
            .spawn(move || Worker::new(settings).run(&command_rx))?;

        Ok(Self {
            command_tx,
            thread_handle: Some(thread_handle),
            next_observer: 0,
        })
    }

    fn send(&self, command: Command) {
        if self.command_tx.send(command).is_err() {
            warn!("simulated output thread is gone, dropping command");
        }
    }
}

impl AudioOutput for SimulatedOutput {
    fn attach(&mut self, item: MediaItem, sink: EventSink) {
        self.send(Command::Attach { item, sink });
    }

    fn detach(&mut self) {
        self.send(Command::Detach);
    }

    fn play(&mut self) {
        self.send(Command::Play);
    }

    fn pause(&mut self) {
        self.send(Command::Pause);
    }

    fn seek(&mut self, position: Duration, seek: SeekId, sink: EventSink) {
        self.send(Command::Seek {
            position,
            seek,
            sink,
        });
    }

    fn load_duration(&mut self, sink: EventSink) {
        self.send(Command::LoadDuration { sink });
    }

    fn add_periodic_position_observer(
        &mut self,
        interval: Duration,
        sink: EventSink,
    ) -> ObserverHandle {
        self.next_observer += 1;
        let handle = ObserverHandle::new(self.next_observer);
        self.send(Command::AddObserver {
            handle,
            interval,
            sink,
        });
        handle
    }

    fn remove_observer(&mut self, handle: ObserverHandle) {
        self.send(Command::RemoveObserver(handle));
    }
}

impl Drop for SimulatedOutput {
    fn drop(&mut self) {
        let _ = self.command_tx.send(Command::Shutdown);
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                warn!("simulated output thread panicked");
            }
        }
    }
}

struct SimItem {
    sink: EventSink,
    ready_at: Instant,
    ready: bool,
    position: Duration,
}

struct Observer {
    handle: ObserverHandle,
    interval: Duration,
    sink: EventSink,
    last_fired: Option<Duration>,
}

struct Worker {
    speed: f64,
    length: Duration,
    load_delay: Duration,
    item: Option<SimItem>,
    playing: bool,
    observers: Vec<Observer>,
    last_advance: Instant,
}

impl Worker {
    fn new(settings: SimulationSettings) -> Self {
        Self {
            speed: if settings.speed.is_finite() && settings.speed > 0.0 {
                settings.speed
            } else {
                1.0
            },
            length: settings.preview_length(),
            load_delay: settings.load_delay(),
            item: None,
            playing: false,
            observers: Vec::new(),
            last_advance: Instant::now(),
        }
    }

    fn run(mut self, command_rx: &Receiver<Command>) {
        debug!("simulated output thread started");

        loop {
            match command_rx.recv_timeout(POLL_INTERVAL) {
                Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Ok(command) => self.apply(command),
                Err(RecvTimeoutError::Timeout) => {}
            }
            self.advance(Instant::now());
        }

        debug!("simulated output thread stopped");
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Attach { item, sink } => self.attach(item, sink),
            Command::Detach => {
                self.item = None;
                self.playing = false;
            }
            Command::Play => self.playing = true,
            Command::Pause => self.playing = false,
            Command::Seek {
                position,
                seek,
                sink,
            } => self.seek(position, seek, &sink),
            Command::LoadDuration { sink } => {
                let result = if self.item.is_some() {
                    Ok(self.length.as_secs_f64())
                } else {
                    Err("no item attached".to_string())
                };
                sink.duration_loaded(result);
            }
            Command::AddObserver {
                handle,
                interval,
                sink,
            } => self.observers.push(Observer {
                handle,
                interval,
                sink,
                last_fired: None,
            }),
            Command::RemoveObserver(handle) => self.observers.retain(|o| o.handle != handle),
            Command::Shutdown => {}
        }
    }

    fn attach(&mut self, item: MediaItem, sink: EventSink) {
        self.playing = false;

        let scheme = item.url.scheme();
        if scheme != "http" && scheme != "https" {
            warn!(url = %item.url, "unsupported preview URL scheme");
            sink.failed(Some(format!("Unsupported URL scheme: {scheme}")));
            self.item = None;
            return;
        }

        info!(track_id = item.track_id, url = %item.url, "simulated item attached");
        self.item = Some(SimItem {
            sink,
            ready_at: Instant::now() + self.load_delay,
            ready: false,
            position: Duration::ZERO,
        });
    }

    fn seek(&mut self, position: Duration, seek: SeekId, sink: &EventSink) {
        let Some(item) = self.item.as_mut().filter(|item| item.ready) else {
            sink.seek_completed(seek, false);
            return;
        };

        item.position = position.min(self.length);
        let position = item.position;
        sink.seek_completed(seek, true);

        for observer in &mut self.observers {
            observer.sink.position_tick(position.as_secs_f64());
            observer.last_fired = Some(position);
        }
    }

    fn advance(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_advance);
        self.last_advance = now;

        let Some(item) = self.item.as_mut() else {
            return;
        };

        if !item.ready {
            if now < item.ready_at {
                return;
            }
            item.ready = true;
            item.sink.ready_to_play(Some(self.length.as_secs_f64()));
            return;
        }

        if !self.playing {
            return;
        }

        item.position = advance_position(item.position, elapsed, self.speed, self.length);
        let position = item.position;

        for observer in &mut self.observers {
            let due = match observer.last_fired {
                Some(last) => position.saturating_sub(last) >= observer.interval,
                None => true,
            };
            if due {
                trace!(position_ms = position.as_millis() as u64, "position tick");
                observer.sink.position_tick(position.as_secs_f64());
                observer.last_fired = Some(position);
            }
        }

        if position >= self.length {
            self.playing = false;
            item.sink.played_to_end();
        }
    }
}

/// Media position after `elapsed` wall time at `speed`, capped at `length`
fn advance_position(position: Duration, elapsed: Duration, speed: f64, length: Duration) -> Duration {
    let step = Duration::try_from_secs_f64(elapsed.as_secs_f64() * speed).unwrap_or(length);
    position.saturating_add(step).min(length)
}

/// Audio session that only logs what a device session would be asked to do
#[derive(Debug, Default)]
pub struct SimulatedSession {
    active: bool,
}

impl SimulatedSession {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl AudioSession for SimulatedSession {
    fn set_category(
        &mut self,
        category: SessionCategory,
        mode: SessionMode,
        options: &[SessionOption],
    ) -> preview_core::Result<()> {
        info!(?category, ?mode, ?options, "audio session configured");
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> preview_core::Result<()> {
        self.active = active;
        info!(active, "audio session activation changed");
        Ok(())
    }
}
