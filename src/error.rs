//! Crate-wide error type and `Result` alias.

use thiserror::Error;

use crate::catalog::{FolderId, TrackId};

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Playback was requested for a track absent from the current queue.
    /// Caller error; the queue is left untouched.
    #[error("track {0} is not in the current queue")]
    TrackNotInQueue(TrackId),

    /// An index outside the current queue order.
    #[error("index {index} out of range for queue of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// The current track vanished while reordering the queue. Defensive:
    /// shuffling never changes queue membership, so this should not occur.
    #[error("track {0} disappeared while reordering the queue")]
    TrackNotFound(TrackId),

    /// Unknown mood folder id at the catalog boundary.
    #[error("mood folder not found: {0}")]
    FolderNotFound(FolderId),

    /// Failure reported by the audio rendering engine. Recoverable: the
    /// controller returns to idle and surfaces the reason.
    #[error("audio engine error: {0}")]
    Engine(String),
}
