use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{FolderId, MediaRef, Mood, MoodFolder, Track, TrackId, make_display};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Scan one directory's audio files into `Track` values.
///
/// Tags are read with lofty; files with unreadable tags still become tracks
/// named after the file stem.
fn scan_tracks(
    dir: &Path,
    folder_mood: Option<Mood>,
    settings: &LibrarySettings,
    next_id: &mut u64,
) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let default_title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();

            let mut title = default_title;
            let mut artist: Option<String> = None;
            let mut duration: Option<Duration> = None;

            if let Ok(tagged) = lofty::read_from_path(path) {
                duration = Some(tagged.properties().duration());

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                        if !v.trim().is_empty() {
                            title = v.to_string();
                        }
                    }
                    if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                        let v = v.trim();
                        if !v.is_empty() {
                            artist = Some(v.to_string());
                        }
                    }
                }
            }

            let display = make_display(&title, artist.as_deref());
            let id = TrackId(*next_id);
            *next_id += 1;

            tracks.push(Track {
                id,
                title,
                artist,
                mood: folder_mood,
                duration,
                media: MediaRef::new(path.to_path_buf()),
                display,
            });
        }
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    tracks
}

/// Scan a library root into mood folders.
///
/// Each immediate subdirectory becomes one folder; when its name parses as a
/// mood, every track inside carries that mood tag. Audio files sitting
/// directly in the root are collected into an extra untagged folder.
pub fn scan_library(root: &Path, settings: &LibrarySettings) -> Vec<MoodFolder> {
    let mut folders: Vec<MoodFolder> = Vec::new();
    let mut next_track_id: u64 = 0;
    let mut next_folder_id: u64 = 0;

    let mut subdirs: Vec<std::path::PathBuf> = std::fs::read_dir(root)
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .filter(|p| settings.include_hidden || !is_hidden(p))
        .collect();
    subdirs.sort();

    for dir in subdirs {
        let name = dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mood = Mood::parse(&name);
        let tracks = scan_tracks(&dir, mood, settings, &mut next_track_id);
        if tracks.is_empty() {
            continue;
        }
        folders.push(MoodFolder {
            id: FolderId(next_folder_id),
            name,
            mood,
            tracks,
        });
        next_folder_id += 1;
    }

    // Loose files in the root become an untagged folder, scanned shallow so
    // the subdirectories above are not picked up twice.
    let loose_settings = LibrarySettings {
        recursive: false,
        ..settings.clone()
    };
    let loose = scan_tracks(root, None, &loose_settings, &mut next_track_id);
    if !loose.is_empty() {
        let name = root
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("library")
            .to_string();
        folders.push(MoodFolder {
            id: FolderId(next_folder_id),
            name,
            mood: None,
            tracks: loose,
        });
    }

    folders
}

#[cfg(test)]
mod scan_tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn scan_library_groups_by_subfolder_and_parses_moods() {
        let dir = tempdir().unwrap();
        let happy = dir.path().join("happy");
        let misc = dir.path().join("roadtrip");
        fs::create_dir_all(&happy).unwrap();
        fs::create_dir_all(&misc).unwrap();
        fs::write(happy.join("b.mp3"), b"not a real mp3").unwrap();
        fs::write(happy.join("a.ogg"), b"not a real ogg").unwrap();
        fs::write(misc.join("c.wav"), b"not a real wav").unwrap();
        fs::write(misc.join("skip.txt"), b"ignore me").unwrap();

        let folders = scan_library(dir.path(), &LibrarySettings::default());
        assert_eq!(folders.len(), 2);

        let happy_folder = &folders[0];
        assert_eq!(happy_folder.name, "happy");
        assert_eq!(happy_folder.mood, Some(Mood::Happy));
        assert_eq!(happy_folder.tracks.len(), 2);
        // sorted by display, case-insensitive
        assert_eq!(happy_folder.tracks[0].title, "a");
        assert_eq!(happy_folder.tracks[1].title, "b");
        assert!(happy_folder.tracks.iter().all(|t| t.mood == Some(Mood::Happy)));

        let misc_folder = &folders[1];
        assert_eq!(misc_folder.mood, None);
        assert_eq!(misc_folder.tracks.len(), 1);
    }

    #[test]
    fn scan_library_assigns_unique_track_ids() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("happy");
        let b = dir.path().join("sad");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("one.mp3"), b"x").unwrap();
        fs::write(b.join("two.mp3"), b"x").unwrap();

        let folders = scan_library(dir.path(), &LibrarySettings::default());
        let mut ids: Vec<_> = folders
            .iter()
            .flat_map(|f| f.tracks.iter().map(|t| t.id))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn scan_library_collects_loose_root_files_without_mood() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("loose.mp3"), b"x").unwrap();

        let folders = scan_library(dir.path(), &LibrarySettings::default());
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].mood, None);
        assert_eq!(folders[0].tracks.len(), 1);
        assert_eq!(folders[0].tracks[0].mood, None);
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        let chill = dir.path().join("chill");
        fs::create_dir_all(&chill).unwrap();
        fs::write(chill.join(".hidden.mp3"), b"not real").unwrap();
        fs::write(chill.join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let folders = scan_library(dir.path(), &settings);

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].tracks.len(), 1);
        assert_eq!(folders[0].tracks[0].display, "visible");
    }

    #[test]
    fn scan_respects_max_depth_within_folders() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("party");
        let d2 = d1.join("deep");
        fs::create_dir_all(&d2).unwrap();
        fs::write(d1.join("one.mp3"), b"not real").unwrap();
        fs::write(d2.join("two.mp3"), b"not real").unwrap();

        // WalkDir depth counts the folder root as 0, children as 1...
        let settings = LibrarySettings {
            max_depth: Some(1),
            ..LibrarySettings::default()
        };
        let folders = scan_library(dir.path(), &settings);
        assert_eq!(folders.len(), 1);
        let names: Vec<&str> = folders[0].tracks.iter().map(|t| t.display.as_str()).collect();
        assert!(names.contains(&"one"));
        assert!(!names.contains(&"two"));
    }
}
