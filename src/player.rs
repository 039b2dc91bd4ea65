//! Playback core: queue, shuffle and the transport state machine.
//!
//! Everything here runs on a single control thread. The controller reacts to
//! user commands and to engine events one at a time, in arrival order, so no
//! locking is involved; the engine handle is the only shared resource and it
//! is driven exclusively by the controller.

mod controller;
mod queue;
mod shuffle;
mod types;

pub use controller::PlayerController;
pub use queue::PlayQueue;
pub use types::{EndOfTrackPolicy, TransportState};
