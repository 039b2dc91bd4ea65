use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Mood tag attached to folders and tracks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Relaxed,
    Romantic,
    Angry,
    Focused,
    Nostalgic,
    Workout,
    Chill,
    Party,
    Sleep,
}

impl Mood {
    /// Parse a mood from a folder name or CLI argument, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "energetic" => Some(Self::Energetic),
            "relaxed" => Some(Self::Relaxed),
            "romantic" => Some(Self::Romantic),
            "angry" => Some(Self::Angry),
            "focused" => Some(Self::Focused),
            "nostalgic" => Some(Self::Nostalgic),
            "workout" => Some(Self::Workout),
            "chill" => Some(Self::Chill),
            "party" => Some(Self::Party),
            "sleep" => Some(Self::Sleep),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Energetic => "energetic",
            Self::Relaxed => "relaxed",
            Self::Romantic => "romantic",
            Self::Angry => "angry",
            Self::Focused => "focused",
            Self::Nostalgic => "nostalgic",
            Self::Workout => "workout",
            Self::Chill => "chill",
            Self::Party => "party",
            Self::Sleep => "sleep",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of a track within a scanned catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a mood folder within a scanned catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(pub u64);

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a track's audio media.
///
/// The player hands this to the audio engine untouched; only the engine
/// adapter knows how to open it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef(PathBuf);

impl MediaRef {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for MediaRef {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

/// A single playable audio item.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: Option<String>,
    pub mood: Option<Mood>,
    /// Total length as reported by the file's tags, when readable.
    /// The authoritative duration still comes from the engine at load time.
    pub duration: Option<Duration>,
    pub media: MediaRef,
    pub display: String,
}

/// A named group of tracks sharing a mood.
#[derive(Debug, Clone)]
pub struct MoodFolder {
    pub id: FolderId,
    pub name: String,
    pub mood: Option<Mood>,
    pub tracks: Vec<Track>,
}

pub(crate) fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}
