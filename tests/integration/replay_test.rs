//! End-to-end replay through the library API

use std::time::Duration;

use termreplay::player::playback::{ManualClock, ReplayOptions, ReplayScheduler, Tick};
use termreplay::player::{dump_final_screen, SchedulerState};
use termreplay::recording::{EndOfStream, LogEvent, LogReader, TerminalSize};
use termreplay::render::segment_row;
use termreplay::terminal::{ReplayTerminal, TerminalProvider};

use crate::helpers::{encode, hello_events, write_log};

fn session_events() -> Vec<LogEvent> {
    vec![
        LogEvent::size_change(0, TerminalSize::new(6, 30)),
        LogEvent::stdout(10, b"$ ls\r\n".to_vec()),
        LogEvent::stdin(15, b"ls\r".to_vec()),
        LogEvent::stdout(40, b"\x1b[1;31merror\x1b[0m: nope\r\n".to_vec()),
        LogEvent::stdout(90, "wide \u{754C} text\r\n".as_bytes().to_vec()),
        LogEvent::size_change(120, TerminalSize::new(4, 20)),
        LogEvent::stdout(150, b"\x1b[2;5Hx".to_vec()),
    ]
}

#[test]
fn replay_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "session.bin", &session_events());

    let first = dump_final_screen(&log, &ReplayOptions::default()).unwrap();
    let second = dump_final_screen(&log, &ReplayOptions::default()).unwrap();

    assert_eq!(first.text, second.text);
    assert_eq!((first.columns, first.rows), (20, 4));
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.stats.resizes, 2);
    assert_eq!(first.stats.input_bytes, 3);
}

#[test]
fn timing_options_do_not_change_final_screen() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "session.bin", &session_events());

    let normal = dump_final_screen(&log, &ReplayOptions::default()).unwrap();
    let fast = dump_final_screen(
        &log,
        &ReplayOptions {
            speed: 8.0,
            idle_time_limit: Some(0.01),
        },
    )
    .unwrap();
    assert_eq!(normal.text, fast.text);
}

#[test]
fn leaving_alternate_screen_matches_clear_and_home() {
    let alt = [
        LogEvent::size_change(0, TerminalSize::new(5, 20)),
        LogEvent::stdout(10, b"shell\r\n".to_vec()),
        LogEvent::stdout(20, b"\x1b[?1049hfullscreen app".to_vec()),
        LogEvent::stdout(30, b"\x1b[?1049lback".to_vec()),
    ];
    let plain = [
        LogEvent::size_change(0, TerminalSize::new(5, 20)),
        LogEvent::stdout(10, b"shell\r\n".to_vec()),
        LogEvent::stdout(20, b"fullscreen app".to_vec()),
        LogEvent::stdout(30, b"\x1b[2J\x1b[Hback".to_vec()),
    ];

    let dir = tempfile::tempdir().unwrap();
    let alt = dump_final_screen(&write_log(dir.path(), "alt.bin", &alt), &ReplayOptions::default())
        .unwrap();
    let plain = dump_final_screen(
        &write_log(dir.path(), "plain.bin", &plain),
        &ReplayOptions::default(),
    )
    .unwrap();

    assert_eq!(alt.text, plain.text);
    assert!(alt.text.starts_with("back"));
}

#[test]
fn truncated_log_finishes_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = encode(&hello_events());
    bytes.truncate(bytes.len() - 1);
    let path = dir.path().join("truncated.bin");
    std::fs::write(&path, bytes).unwrap();

    let screen = dump_final_screen(&path, &ReplayOptions::default()).unwrap();
    assert!(screen.text.starts_with("Hel\n"));
    assert_eq!(screen.stats.events, 2);
    assert_eq!(
        screen.end,
        Some(EndOfStream::TruncatedPayload {
            declared: 2,
            available: 1
        })
    );
}

#[test]
fn hello_scenario_through_manual_clock() {
    let bytes = encode(&hello_events());
    let clock = ManualClock::new();
    let mut scheduler = ReplayScheduler::with_clock(
        LogReader::new(bytes.as_slice()),
        clock.clone(),
        ReplayOptions::default(),
    );
    let mut model = ReplayTerminal::new();

    let mut delays = Vec::new();
    while let Tick::Wait(wait) = scheduler.tick(&mut model) {
        delays.push(scheduler.last_delay().unwrap());
        clock.advance(wait);
    }

    assert_eq!(delays.len(), 3);
    for (got, want) in delays.iter().zip([0.0, 0.1, 0.15]) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
    assert_eq!(scheduler.state(), SchedulerState::Finished);
    assert_eq!(model.size(), (80, 24));
    assert_eq!(model.grid().line(0), "Hello");
    assert!(clock.elapsed() >= Duration::from_millis(250));
}

#[test]
fn final_rows_segment_into_styled_runs() {
    let bytes = encode(&session_events()[..4]);
    let clock = ManualClock::new();
    let mut scheduler = ReplayScheduler::with_clock(
        LogReader::new(bytes.as_slice()),
        clock.clone(),
        ReplayOptions::default(),
    );
    let mut model = ReplayTerminal::new();
    while let Tick::Wait(wait) = scheduler.tick(&mut model) {
        clock.advance(wait);
    }

    let grid = model.grid();
    let runs = segment_row(grid.row(1).unwrap());
    assert_eq!(runs[0].text, "error");
    assert!(runs[0].style.bold);
    assert!(runs[1].text.starts_with(": nope"));
    assert!(!runs[1].style.bold);
}
