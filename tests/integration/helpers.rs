//! Shared fixtures for integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use termreplay::recording::{LogEvent, LogWriter, TerminalSize};

/// Write `events` as a session log named `name` inside `dir`.
pub fn write_log(dir: &Path, name: &str, events: &[LogEvent]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = LogWriter::create(&path).unwrap();
    for event in events {
        writer.write_event(event).unwrap();
    }
    path
}

/// Encode `events` in memory.
pub fn encode(events: &[LogEvent]) -> Vec<u8> {
    let mut writer = LogWriter::new(Vec::new());
    for event in events {
        writer.write_event(event).unwrap();
    }
    writer.into_inner()
}

/// The canonical three-event log: 80x24, then "Hel" and "lo".
pub fn hello_events() -> Vec<LogEvent> {
    vec![
        LogEvent::size_change(0, TerminalSize::new(24, 80)),
        LogEvent::stdout(100, b"Hel".to_vec()),
        LogEvent::stdout(250, b"lo".to_vec()),
    ]
}

/// A config file that sends logs into `dir` instead of the user's state dir.
pub fn config_in(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    let log = dir.join("termreplay.log");
    std::fs::write(
        &path,
        format!("[logging]\nfile = {:?}\nlevel = \"debug\"\n", log.display().to_string()),
    )
    .unwrap();
    path
}

/// The termreplay binary, isolated from the user's environment.
pub fn termreplay() -> Command {
    let mut cmd = Command::cargo_bin("termreplay").unwrap();
    cmd.env_remove("TERMREPLAY_SPEED")
        .env_remove("TERMREPLAY_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}
