//! Command-line behavior of the termreplay binary

use predicates::prelude::*;
use termreplay::recording::{LogEvent, TerminalSize};

use crate::helpers::{config_in, hello_events, termreplay, write_log};

#[test]
fn missing_log_argument_prints_usage() {
    termreplay()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn extra_argument_prints_usage() {
    termreplay()
        .args(["one.bin", "two.bin"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_log_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    termreplay()
        .arg("--config")
        .arg(&config)
        .arg("--dump")
        .arg(dir.path().join("missing.bin"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open session log"));
}

#[test]
fn dump_prints_final_screen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let log = write_log(dir.path(), "hello.bin", &hello_events());

    termreplay()
        .arg("--config")
        .arg(&config)
        .arg("--dump")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Hello"))
        .stderr(predicate::str::contains("3 events"));
}

#[test]
fn dump_writes_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let log = write_log(dir.path(), "hello.bin", &hello_events());

    termreplay()
        .arg("--config")
        .arg(&config)
        .arg("--dump")
        .arg(&log)
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("termreplay.log")).unwrap();
    assert!(content.contains("Playback finished"));
}

#[test]
fn dump_survives_malformed_size_change() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let log = write_log(
        dir.path(),
        "bad.bin",
        &[
            LogEvent::size_change(0, TerminalSize::new(5, 40)),
            LogEvent::new(termreplay::recording::EventKind::SizeChange, 10, vec![1]),
            LogEvent::stdout(20, b"still here".to_vec()),
        ],
    );

    termreplay()
        .arg("--config")
        .arg(&config)
        .arg("--dump")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("still here"))
        .stderr(predicate::str::contains("1 skipped"));
}

#[test]
fn unknown_config_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[playback]\nturbo = true\n").unwrap();
    let log = write_log(dir.path(), "hello.bin", &hello_events());

    termreplay()
        .arg("--config")
        .arg(&config)
        .arg("--dump")
        .arg(&log)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("turbo"));
}

#[test]
fn invalid_speed_is_a_usage_error() {
    termreplay()
        .args(["--speed", "0", "x.bin"])
        .assert()
        .code(2);
}

#[test]
fn version_includes_build_info() {
    termreplay()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
