//! The playback queue: an ordered sequence of tracks plus a current-index
//! pointer, navigated with wrap-around in both directions.
//!
//! The queue keeps the catalog order alongside the active order so shuffle
//! can be toggled off without losing the original sequence. The currently
//! playing track is relocated by identity whenever the order changes.

use crate::catalog::{Track, TrackId};
use crate::error::{Error, Result};

use super::shuffle;

#[derive(Default)]
pub struct PlayQueue {
    catalog_order: Vec<Track>,
    order: Vec<Track>,
    current: Option<usize>,
    shuffled: bool,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue contents with `tracks` in catalog order. Clears the
    /// current index and cancels any active shuffle.
    pub fn load(&mut self, tracks: Vec<Track>) {
        self.order = tracks.clone();
        self.catalog_order = tracks;
        self.current = None;
        self.shuffled = false;
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// The active navigation order.
    pub fn order(&self) -> &[Track] {
        &self.order
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.order.get(i))
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.order.get(index)
    }

    /// Position of a track in the active order.
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.order.iter().position(|t| t.id == id)
    }

    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if index >= self.order.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.order.len(),
            });
        }
        self.current = Some(index);
        Ok(())
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Index one step forward, wrapping past the end. `None` when empty.
    /// With no current index the first track is next.
    pub fn next_index(&self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        Some(match self.current {
            Some(i) => (i + 1) % self.order.len(),
            None => 0,
        })
    }

    /// Index one step backward, wrapping past the start. `None` when empty.
    pub fn prev_index(&self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        let len = self.order.len();
        Some(match self.current {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        })
    }

    /// Enable or disable shuffle, keeping the identity of the current track.
    ///
    /// Enabling computes a fresh random permutation; disabling restores the
    /// catalog order. Either way the current index is recomputed by locating
    /// the current track's id in the new order before anything is committed,
    /// so a failed relocation leaves the queue untouched. A no-op when the
    /// flag does not change.
    pub fn shuffle(&mut self, enable: bool) -> Result<()> {
        if enable == self.shuffled {
            return Ok(());
        }

        let new_order = if enable {
            shuffle::shuffled(&self.catalog_order)
        } else {
            self.catalog_order.clone()
        };

        let new_current = match self.current_track().map(|t| t.id) {
            Some(id) => Some(
                new_order
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or(Error::TrackNotFound(id))?,
            ),
            None => None,
        };

        self.order = new_order;
        self.current = new_current;
        self.shuffled = enable;
        Ok(())
    }
}
