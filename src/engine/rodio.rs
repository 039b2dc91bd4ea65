//! Rodio-backed implementation of the engine boundary.
//!
//! One sink per load; seeking rebuilds the sink with `skip_duration`, which
//! works for the common formats. Elapsed time is tracked host-side from an
//! `Instant` plus the time accumulated before the last pause.

use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::catalog::MediaRef;
use crate::error::{Error, Result};

use super::{AudioEngine, EngineEvent, LoadId};

struct CurrentLoad {
    id: LoadId,
    media: MediaRef,
}

pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    current: Option<CurrentLoad>,
    next_load: u64,
    volume: f32,
    paused: bool,
    // Wall-clock start of the running stretch, and elapsed accumulated
    // across earlier stretches (before pauses/seeks).
    started_at: Option<Instant>,
    accumulated: Duration,
    pending: Vec<EngineEvent>,
    ended: bool,
}

impl RodioEngine {
    pub fn new() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Engine(format!("no audio output device: {e}")))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy here.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            current: None,
            next_load: 0,
            volume: 1.0,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            pending: Vec::new(),
            ended: false,
        })
    }

    /// Open `media` into a paused sink starting at `start_at`, reporting the
    /// total duration when the decoder or the file's tags know it.
    fn open_sink(
        &self,
        media: &MediaRef,
        start_at: Duration,
    ) -> std::result::Result<(Sink, Option<Duration>), String> {
        let path = media.path();
        let file =
            File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| format!("failed to decode {}: {e}", path.display()))?;

        let duration = decoder
            .total_duration()
            .or_else(|| lofty::read_from_path(path).ok().map(|t| t.properties().duration()));

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(decoder.skip_duration(start_at));
        sink.pause();
        sink.set_volume(self.volume);
        Ok((sink, duration))
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, media: &MediaRef) -> LoadId {
        let id = LoadId(self.next_load);
        self.next_load += 1;

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.current = Some(CurrentLoad {
            id,
            media: media.clone(),
        });
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.ended = false;

        match self.open_sink(media, Duration::ZERO) {
            Ok((sink, duration)) => {
                self.sink = Some(sink);
                self.pending.push(EngineEvent::Ready {
                    load: id,
                    duration: duration.unwrap_or(Duration::ZERO),
                });
            }
            Err(reason) => {
                self.pending.push(EngineEvent::Error { load: id, reason });
            }
        }

        id
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
            if self.started_at.is_none() {
                self.started_at = Some(Instant::now());
            }
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
            if let Some(started) = self.started_at.take() {
                self.accumulated += started.elapsed();
            }
            self.paused = true;
        }
    }

    fn seek_to(&mut self, position: Duration) {
        // Scrubbing: rebuild the sink and skip into the file.
        let Some(current) = &self.current else {
            return;
        };
        if self.sink.is_none() {
            return;
        }
        let id = current.id;
        let media = current.media.clone();

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        match self.open_sink(&media, position) {
            Ok((sink, _)) => {
                if self.paused {
                    self.started_at = None;
                } else {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.accumulated = position;
                self.ended = false;
                self.sink = Some(sink);
            }
            Err(reason) => {
                self.pending.push(EngineEvent::Error { load: id, reason });
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let mut events = std::mem::take(&mut self.pending);

        let ended_now = if let (Some(sink), Some(current)) = (&self.sink, &self.current) {
            if self.paused {
                false
            } else {
                let elapsed = self.accumulated
                    + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
                events.push(EngineEvent::Position {
                    load: current.id,
                    elapsed,
                });
                if sink.empty() && !self.ended {
                    events.push(EngineEvent::Ended { load: current.id });
                    true
                } else {
                    false
                }
            }
        } else {
            false
        };
        if ended_now {
            self.ended = true;
        }

        events
    }

    fn detach(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.ended = false;
    }
}
