//! moodtune: a mood-folder music organizer core.
//!
//! Tracks live in mood folders scanned from disk ([`catalog`]); the
//! [`player`] module owns the playback queue, shuffle and the transport
//! state machine, driving whatever [`engine::AudioEngine`] it is given.
//! The controller never touches the audio backend directly, so the same
//! state machine runs against the bundled rodio adapter or a test mock.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod player;

pub use error::{Error, Result};
