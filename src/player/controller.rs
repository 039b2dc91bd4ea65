//! The playback controller: binds queue navigation to engine commands and
//! mirrors the engine's asynchronous events into transport state.

use std::time::Duration;

use crate::catalog::{Track, TrackId};
use crate::engine::{AudioEngine, EngineEvent, LoadId};
use crate::error::{Error, Result};

use super::queue::PlayQueue;
use super::types::{EndOfTrackPolicy, TransportState};

/// One controller instance per active view. Owns the queue and transport
/// state for its lifetime; the engine is attached at construction and only
/// commanded, never managed beyond load/detach boundaries.
pub struct PlayerController<E: AudioEngine> {
    engine: E,
    queue: PlayQueue,
    policy: EndOfTrackPolicy,
    state: TransportState,
    volume: f32,
    position: Duration,
    duration: Option<Duration>,
    /// The engine load the controller currently cares about. Events tagged
    /// with any other load are stale and dropped (last-writer-wins).
    current_load: Option<LoadId>,
    last_error: Option<String>,
}

impl<E: AudioEngine> PlayerController<E> {
    pub fn new(mut engine: E, policy: EndOfTrackPolicy, default_volume: f32) -> Self {
        let volume = default_volume.clamp(0.0, 1.0);
        engine.set_volume(volume);
        Self {
            engine,
            queue: PlayQueue::new(),
            policy,
            state: TransportState::Idle,
            volume,
            position: Duration::ZERO,
            duration: None,
            current_load: None,
            last_error: None,
        }
    }

    /// Replace the queue with `tracks`, resetting the transport to idle.
    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        if self.current_load.is_some() {
            self.engine.detach();
        }
        self.queue.load(tracks);
        self.current_load = None;
        self.state = TransportState::Idle;
        self.position = Duration::ZERO;
        self.duration = None;
        tracing::debug!(len = self.queue.len(), "queue replaced");
    }

    /// Start playback of the track with the given id.
    ///
    /// Fails with [`Error::TrackNotInQueue`] when the track is not part of
    /// the current order; the queue and transport are left unchanged.
    pub fn play_track(&mut self, id: TrackId) -> Result<()> {
        let index = self
            .queue
            .position_of(id)
            .ok_or(Error::TrackNotInQueue(id))?;
        self.play_index(index)
    }

    /// Start playback of the track at `index` in the active order.
    pub fn play_index(&mut self, index: usize) -> Result<()> {
        self.queue.set_current(index)?;
        // set_current validated the index, so the track is there.
        let (media, display_name) = {
            let track = self.queue.current_track().ok_or(Error::OutOfRange {
                index,
                len: self.queue.len(),
            })?;
            (track.media.clone(), track.display.clone())
        };

        let load = self.engine.load(&media);
        // Standing play intent: rendering starts once the engine is ready.
        self.engine.play();

        self.current_load = Some(load);
        self.state = TransportState::Loading;
        self.position = Duration::ZERO;
        self.duration = None;
        tracing::debug!(display = %display_name, index, "loading track");
        Ok(())
    }

    /// Flip between playing and paused. No-op in any other state.
    pub fn toggle_play_pause(&mut self) {
        match self.state {
            TransportState::Playing => {
                self.engine.pause();
                self.state = TransportState::Paused;
            }
            TransportState::Paused => {
                self.engine.play();
                self.state = TransportState::Playing;
            }
            _ => {}
        }
    }

    /// Jump to `fraction` of the track, 0.0..=1.0 (clamped).
    ///
    /// No-op until the engine has reported a duration. The position is
    /// updated optimistically and reconciled by the next position event.
    pub fn seek(&mut self, fraction: f32) {
        let Some(duration) = self.duration else {
            return;
        };
        if duration.is_zero() {
            return;
        }
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target = duration.mul_f32(fraction);
        self.position = target;
        self.engine.seek_to(target);
    }

    /// Set the volume, clamping out-of-range input. Forwarded to the engine
    /// immediately, independent of transport state.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.engine.set_volume(self.volume);
    }

    /// Play the next track in the order, wrapping. No-op on an empty queue.
    pub fn next(&mut self) -> Result<()> {
        match self.queue.next_index() {
            Some(index) => self.play_index(index),
            None => Ok(()),
        }
    }

    /// Play the previous track in the order, wrapping. No-op on an empty queue.
    pub fn prev(&mut self) -> Result<()> {
        match self.queue.prev_index() {
            Some(index) => self.play_index(index),
            None => Ok(()),
        }
    }

    /// Enable or disable shuffle, preserving the current track's identity.
    pub fn set_shuffle(&mut self, enable: bool) -> Result<()> {
        self.queue.shuffle(enable)
    }

    /// Drain the engine's buffered events into the state machine.
    pub fn pump(&mut self) {
        for event in self.engine.poll_events() {
            self.handle_event(event);
        }
    }

    /// Apply one engine event. Events from abandoned loads are ignored.
    pub fn handle_event(&mut self, event: EngineEvent) {
        if self.current_load != Some(event.load()) {
            tracing::trace!(?event, "dropping stale engine event");
            return;
        }

        match event {
            EngineEvent::Ready { duration, .. } => {
                self.duration = Some(duration);
                if self.state == TransportState::Loading {
                    self.state = TransportState::Playing;
                }
            }
            EngineEvent::Position { elapsed, .. } => {
                self.position = elapsed;
            }
            EngineEvent::Ended { .. } => {
                self.state = TransportState::Ended;
                self.finish_track();
            }
            EngineEvent::Error { reason, .. } => {
                tracing::warn!(%reason, "engine reported an error");
                self.last_error = Some(reason);
                self.current_load = None;
                self.state = TransportState::Idle;
                self.position = Duration::ZERO;
                self.duration = None;
                // Queue state is untouched; a new command restarts playback.
            }
        }
    }

    /// Resolve the transient `Ended` state through the end-of-track policy.
    fn finish_track(&mut self) {
        match self.policy {
            EndOfTrackPolicy::Stop => {
                self.engine.detach();
                self.queue.clear_current();
                self.current_load = None;
                self.state = TransportState::Idle;
                self.position = Duration::ZERO;
                self.duration = None;
            }
            EndOfTrackPolicy::AutoAdvance => {
                // next() on a non-empty queue cannot fail; an empty queue
                // cannot have produced an Ended event in the first place.
                if let Err(e) = self.next() {
                    tracing::warn!(error = %e, "auto-advance failed");
                }
            }
        }
    }

    /// Detach from the engine when the owning view closes.
    pub fn detach(&mut self) {
        self.engine.detach();
        self.current_load = None;
        self.state = TransportState::Idle;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn policy(&self) -> EndOfTrackPolicy {
        self.policy
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Elapsed fraction of the current track, clamped to [0, 1].
    /// Zero while the duration is unknown or zero.
    pub fn progress_fraction(&self) -> f32 {
        match self.duration {
            Some(d) if !d.is_zero() => {
                (self.position.as_secs_f32() / d.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current_track()
    }

    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    /// Reason of the most recent engine error, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
impl<E: AudioEngine> PlayerController<E> {
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
