//! Small transport-related types.

/// The transport state of the player.
///
/// `Loading` covers the window between commanding the engine to load a track
/// and its readiness event; `Ended` is transient and always resolves through
/// the end-of-track policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Ended,
}

/// What the controller does when a track finishes on its own.
///
/// Chosen when the controller is constructed for a view and immutable
/// afterwards: a folder view stops at the end of a track, the mood
/// recommendation view advances through the queue, wrapping around.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndOfTrackPolicy {
    /// Clear the current track and return to idle.
    Stop,
    /// Play the next queued track, wrapping at the end of the queue.
    AutoAdvance,
}
