use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/moodtune/config.toml` or
/// `~/.config/moodtune/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MOODTUNE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume applied to a freshly constructed player, 0.0..=1.0.
    pub default_volume: f32,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// What happens when a track finishes on its own.
    pub end_of_track: EndOfTrackSetting,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_volume: 0.7,
            shuffle: false,
            end_of_track: EndOfTrackSetting::AutoAdvance,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndOfTrackSetting {
    /// Clear the current track and go idle.
    Stop,
    /// Advance to the next queued track, wrapping at the end.
    #[serde(
        alias = "autoadvance",
        alias = "auto_advance",
        alias = "advance",
        alias = "loop"
    )]
    AutoAdvance,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories of each mood folder.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}
