//! Headless command-line front end.
//!
//! Scans a library directory into mood folders, queues one mood (or the
//! first folder) and drives the player from stdin commands. Engine events
//! are pumped on a short timeout between commands so playback keeps
//! advancing while the prompt is idle.

use std::env;
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use moodtune::catalog::{Catalog, Mood};
use moodtune::config::{EndOfTrackSetting, Settings};
use moodtune::engine::RodioEngine;
use moodtune::player::{EndOfTrackPolicy, PlayerController};

fn load_settings() -> Settings {
    match Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                tracing::warn!(%msg, "invalid config, using defaults");
                Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent startup.
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Settings::default()
        }
    }
}

fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn print_status<E: moodtune::engine::AudioEngine>(player: &PlayerController<E>) {
    match player.current_track() {
        Some(track) => {
            let total = player
                .duration()
                .map(format_time)
                .unwrap_or_else(|| "?:??".to_string());
            println!(
                "[{:?}] {} {}/{} vol {:.0}%",
                player.state(),
                track.display,
                format_time(player.position()),
                total,
                player.volume() * 100.0
            );
        }
        None => println!("[{:?}] nothing loaded", player.state()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = load_settings();

    let dir = env::args().nth(1).unwrap_or_else(|| {
        env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });
    let mood = env::args().nth(2).and_then(|m| Mood::parse(&m));

    let catalog = Catalog::scan(Path::new(&dir), &settings.library);
    if catalog.is_empty() {
        eprintln!("moodtune: no audio files found under {dir}");
        return Ok(());
    }

    let tracks = match mood {
        Some(mood) => {
            let tracks = catalog.fetch_by_mood(mood);
            if tracks.is_empty() {
                eprintln!("moodtune: no tracks tagged '{mood}' under {dir}");
                return Ok(());
            }
            tracks
        }
        None => catalog.fetch_by_folder(catalog.folders()[0].id)?,
    };

    let policy = match settings.playback.end_of_track {
        EndOfTrackSetting::Stop => EndOfTrackPolicy::Stop,
        EndOfTrackSetting::AutoAdvance => EndOfTrackPolicy::AutoAdvance,
    };

    let engine = RodioEngine::new()?;
    let mut player = PlayerController::new(engine, policy, settings.playback.default_volume);
    player.set_queue(tracks);
    if settings.playback.shuffle {
        player.set_shuffle(true)?;
    }

    for (i, track) in player.queue().order().iter().enumerate() {
        println!("{:>3}  {}", i + 1, track.display);
    }
    println!("commands: <n>=play, p=pause/resume, n=next, b=prev, s=shuffle, seek <0..1>, vol <0..1>, q=quit");

    if let Some(first) = player.queue().track_at(0).map(|t| t.id) {
        player.play_track(first)?;
    }

    // Stdin reader thread; the control loop stays free to pump the engine.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut last_track = player.current_track().map(|t| t.id);
    loop {
        match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(line) => {
                let line = line.trim();
                let mut parts = line.split_whitespace();
                match parts.next() {
                    Some("q") => break,
                    Some("p") => player.toggle_play_pause(),
                    Some("n") => player.next()?,
                    Some("b") => player.prev()?,
                    Some("s") => {
                        let enable = !player.queue().is_shuffled();
                        player.set_shuffle(enable)?;
                        println!("shuffle {}", if enable { "on" } else { "off" });
                    }
                    Some("seek") => {
                        if let Some(f) = parts.next().and_then(|v| v.parse::<f32>().ok()) {
                            player.seek(f);
                        }
                    }
                    Some("vol") => {
                        if let Some(v) = parts.next().and_then(|v| v.parse::<f32>().ok()) {
                            player.set_volume(v);
                        }
                    }
                    Some(index) => {
                        if let Ok(i) = index.parse::<usize>() {
                            if i >= 1 {
                                match player.play_index(i - 1) {
                                    Ok(()) => {}
                                    Err(e) => println!("{e}"),
                                }
                            }
                        } else {
                            print_status(&player);
                        }
                    }
                    None => print_status(&player),
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                player.pump();
                let now = player.current_track().map(|t| t.id);
                if now != last_track {
                    if let Some(track) = player.current_track() {
                        println!("> {}", track.display);
                    }
                    last_track = now;
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    player.detach();
    Ok(())
}
