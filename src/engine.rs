//! Audio rendering engine boundary.
//!
//! The player drives an engine through this trait and consumes the events it
//! emits. Loading is asynchronous: `load` returns immediately with a
//! [`LoadId`], and every event carries the id of the load it belongs to so a
//! consumer can discard events from a load it has since abandoned.

use std::time::Duration;

use crate::catalog::MediaRef;

mod rodio;

pub use self::rodio::RodioEngine;

/// Identity of one `load` call. Monotonically increasing per engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

/// Event emitted by an audio engine, tagged with the load it pertains to.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The media decoded successfully and playback can begin.
    Ready { load: LoadId, duration: Duration },
    /// Periodic elapsed-time report. Advisory only.
    Position { load: LoadId, elapsed: Duration },
    /// The track finished rendering on its own.
    Ended { load: LoadId },
    /// The load or playback failed.
    Error { load: LoadId, reason: String },
}

impl EngineEvent {
    /// The load this event belongs to.
    pub fn load(&self) -> LoadId {
        match self {
            Self::Ready { load, .. }
            | Self::Position { load, .. }
            | Self::Ended { load }
            | Self::Error { load, .. } => *load,
        }
    }
}

/// Commands understood by an audio rendering engine.
///
/// `play`/`pause`/`seek_to`/`set_volume` apply to the most recent load.
/// Engines are free to buffer events; `poll_events` drains whatever has
/// accumulated since the last call, in emission order.
pub trait AudioEngine {
    /// Begin loading `media`, replacing any previous load.
    fn load(&mut self, media: &MediaRef) -> LoadId;

    /// Start or resume rendering. Issued right after `load` it acts as a
    /// standing intent: audio becomes audible once the media is ready.
    fn play(&mut self);

    fn pause(&mut self);

    /// Jump to an absolute position in the current media.
    fn seek_to(&mut self, position: Duration);

    /// Set the rendering volume, 0.0..=1.0.
    fn set_volume(&mut self, volume: f32);

    /// Drain buffered events in emission order.
    fn poll_events(&mut self) -> Vec<EngineEvent>;

    /// Release the current media and any backing resources.
    fn detach(&mut self);
}
