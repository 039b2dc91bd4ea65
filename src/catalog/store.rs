use std::path::Path;

use crate::config::LibrarySettings;
use crate::error::{Error, Result};

use super::model::{FolderId, Mood, MoodFolder, Track};
use super::scan::scan_library;

/// The scanned track catalog. Read-only once built; the player works on
/// cloned track lists and never writes back.
pub struct Catalog {
    folders: Vec<MoodFolder>,
}

impl Catalog {
    /// Build a catalog by scanning `root` for mood folders.
    pub fn scan(root: &Path, settings: &LibrarySettings) -> Self {
        let folders = scan_library(root, settings);
        tracing::debug!(
            folders = folders.len(),
            tracks = folders.iter().map(|f| f.tracks.len()).sum::<usize>(),
            "catalog scanned"
        );
        Self { folders }
    }

    pub fn from_folders(folders: Vec<MoodFolder>) -> Self {
        Self { folders }
    }

    pub fn folders(&self) -> &[MoodFolder] {
        &self.folders
    }

    pub fn is_empty(&self) -> bool {
        self.folders.iter().all(|f| f.tracks.is_empty())
    }

    /// Tracks of one folder, in catalog order.
    pub fn fetch_by_folder(&self, id: FolderId) -> Result<Vec<Track>> {
        self.folders
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.tracks.clone())
            .ok_or(Error::FolderNotFound(id))
    }

    /// All tracks tagged with `mood`, across folders, sorted by title.
    pub fn fetch_by_mood(&self, mood: Mood) -> Vec<Track> {
        let mut tracks: Vec<Track> = self
            .folders
            .iter()
            .flat_map(|f| f.tracks.iter())
            .filter(|t| t.mood == Some(mood))
            .cloned()
            .collect();
        tracks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        tracks
    }
}
