//! Event scheduler for log replay.
//!
//! The scheduler pulls one event from the log per tick and applies it to a
//! [`TerminalProvider`]. Waits between ticks are derived from *logical*
//! time (the sum of recorded inter-event delays) compared against the wall
//! clock, so time spent rendering or sleeping late is absorbed instead of
//! accumulating over a long session.
//!
//! Each tick applies the event decoded on the previous tick and then looks
//! ahead one event to compute how long to wait before it is due:
//!
//! ```text
//! tick 1: start clock, decode e1           -> wait until logical(e1)
//! tick 2: apply e1, decode e2              -> wait until logical(e2)
//! tick n: apply e(n-1), decode nothing     -> Finished
//! ```

use std::io::Read;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::stats::PlaybackStats;
use crate::recording::{EndOfStream, EventKind, LogEvent, LogReader};
use crate::terminal::TerminalProvider;

/// Timing adjustments applied to recorded delays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayOptions {
    /// Playback speed multiplier (1.0 = recorded speed)
    pub speed: f64,
    /// Upper bound in seconds for any single inter-event delay
    pub idle_time_limit: Option<f64>,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            idle_time_limit: None,
        }
    }
}

impl ReplayOptions {
    /// Scale and cap a raw recorded delay.
    pub fn adjust(&self, raw_delay_s: f64) -> f64 {
        let speed = if self.speed > 0.0 { self.speed } else { 1.0 };
        let delay = raw_delay_s.max(0.0) / speed;
        match self.idle_time_limit {
            Some(limit) if limit >= 0.0 => delay.min(limit),
            _ => delay,
        }
    }
}

/// Lifecycle of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Playing,
    Finished,
}

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Call `tick` again after this long
    Wait(Duration),
    /// Playback is over
    Finished,
}

/// Timing state carried from tick to tick.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleState {
    pub prev_event_timestamp_ms: Option<i64>,
    /// Sum of every delay dispatched so far. Never decreases.
    pub logical_elapsed_s: f64,
    pub wall_clock_start: Instant,
}

impl ScheduleState {
    pub fn new(wall_clock_start: Instant) -> Self {
        Self {
            prev_event_timestamp_ms: None,
            logical_elapsed_s: 0.0,
            wall_clock_start,
        }
    }

    /// Account for the next event and return its delay in seconds.
    ///
    /// A timestamp earlier than the previous one contributes no delay.
    pub fn advance(&mut self, timestamp_ms: i64, options: &ReplayOptions) -> f64 {
        let raw = match self.prev_event_timestamp_ms {
            Some(prev) => timestamp_ms.saturating_sub(prev) as f64 / 1000.0,
            None => 0.0,
        };
        let delay = options.adjust(raw);
        self.prev_event_timestamp_ms = Some(timestamp_ms);
        self.logical_elapsed_s += delay;
        delay
    }

    /// How far the wall clock trails logical time, or zero if it is ahead.
    ///
    /// Saturates at `Duration::MAX` when logical time outgrows `Duration`.
    pub fn wait(&self, now: Instant) -> Duration {
        let actual_s = now.saturating_duration_since(self.wall_clock_start).as_secs_f64();
        let behind = self.logical_elapsed_s - actual_s;
        if behind > 0.0 {
            Duration::try_from_secs_f64(behind).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }
}

/// Drives a [`TerminalProvider`] from a session log at recorded timing.
pub struct ReplayScheduler<R, C = SystemClock> {
    reader: LogReader<R>,
    clock: C,
    options: ReplayOptions,
    state: SchedulerState,
    schedule: Option<ScheduleState>,
    pending: Option<LogEvent>,
    last_delay: Option<f64>,
    stats: PlaybackStats,
}

impl<R: Read> ReplayScheduler<R, SystemClock> {
    pub fn new(reader: LogReader<R>, options: ReplayOptions) -> Self {
        Self::with_clock(reader, SystemClock, options)
    }
}

impl<R: Read, C: Clock> ReplayScheduler<R, C> {
    pub fn with_clock(reader: LogReader<R>, clock: C, options: ReplayOptions) -> Self {
        Self {
            reader,
            clock,
            options,
            state: SchedulerState::Idle,
            schedule: None,
            pending: None,
            last_delay: None,
            stats: PlaybackStats::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SchedulerState::Finished
    }

    /// Timing state, once playback has started.
    pub fn schedule(&self) -> Option<&ScheduleState> {
        self.schedule.as_ref()
    }

    /// Delay computed for the most recently decoded event, in seconds.
    pub fn last_delay(&self) -> Option<f64> {
        self.last_delay
    }

    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    pub fn options(&self) -> &ReplayOptions {
        &self.options
    }

    /// Why the log stopped producing events, once it has.
    pub fn end_of_stream(&self) -> Option<&EndOfStream> {
        self.reader.end_of_stream()
    }

    /// Advance playback by one event.
    ///
    /// Applies the event that is now due, decodes the next one and returns
    /// how long to wait before it is due. Returns [`Tick::Finished`] once the
    /// log is exhausted or [`finish`](Self::finish) was called.
    pub fn tick<M: TerminalProvider>(&mut self, model: &mut M) -> Tick {
        match self.state {
            SchedulerState::Finished => return Tick::Finished,
            SchedulerState::Idle => {
                self.state = SchedulerState::Playing;
                info!(
                    speed = self.options.speed,
                    idle_time_limit = ?self.options.idle_time_limit,
                    "Playback started"
                );
            }
            SchedulerState::Playing => {}
        }
        let started = self.clock.now();
        let schedule = self
            .schedule
            .get_or_insert_with(|| ScheduleState::new(started));

        let Some(next) = self.reader.read_next() else {
            // Apply the last event before stopping
            if let Some(event) = self.pending.take() {
                apply_event(model, &event, &mut self.stats);
            }
            self.finish();
            return Tick::Finished;
        };

        let delay = schedule.advance(next.timestamp_ms, &self.options);
        if let Some(event) = self.pending.replace(next) {
            apply_event(model, &event, &mut self.stats);
        }
        let wait = schedule.wait(self.clock.now());
        let logical = schedule.logical_elapsed_s;
        self.last_delay = Some(delay);

        debug!(delay, logical, wait_ms = wait.as_millis() as u64, "Scheduled next event");
        Tick::Wait(wait)
    }

    /// Stop playback. Any event still waiting to be applied is dropped.
    pub fn finish(&mut self) {
        if self.state == SchedulerState::Finished {
            return;
        }
        self.state = SchedulerState::Finished;
        self.pending = None;
        info!(
            stats = %self.stats,
            end = ?self.reader.end_of_stream(),
            "Playback finished"
        );
    }
}

/// Apply one event to the terminal, counting it in `stats`.
///
/// Failures are logged and counted as skipped; playback carries on.
fn apply_event<M: TerminalProvider>(model: &mut M, event: &LogEvent, stats: &mut PlaybackStats) {
    let result = match event.kind {
        EventKind::SizeChange => match event.parse_size() {
            Ok(size) => {
                stats.resizes += 1;
                model.resize(size.rows as usize, size.cols as usize)
            }
            Err(e) => {
                warn!(error = %e, timestamp_ms = event.timestamp_ms, "Skipping size change");
                stats.skipped += 1;
                return;
            }
        },
        EventKind::Stdout => {
            stats.output_bytes += event.payload.len() as u64;
            model.feed_output(&event.payload)
        }
        EventKind::Stdin => {
            stats.input_bytes += event.payload.len() as u64;
            model.send_input(&event.payload)
        }
    };

    match result {
        Ok(()) => stats.events += 1,
        Err(e) => {
            warn!(
                error = %e,
                kind = ?event.kind,
                timestamp_ms = event.timestamp_ms,
                "Skipping event"
            );
            stats.skipped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::playback::ManualClock;
    use crate::recording::{LogWriter, TerminalSize};
    use crate::terminal::ReplayTerminal;

    fn encode(events: &[LogEvent]) -> Vec<u8> {
        let mut writer = LogWriter::new(Vec::new());
        for event in events {
            writer.write_event(event).unwrap();
        }
        writer.into_inner()
    }

    fn hello_log() -> Vec<u8> {
        encode(&[
            LogEvent::size_change(0, TerminalSize::new(24, 80)),
            LogEvent::stdout(100, b"Hello".to_vec()),
            LogEvent::stdout(250, b"\n".to_vec()),
        ])
    }

    /// Run to completion, advancing the clock by each wait; returns delays.
    fn run(
        scheduler: &mut ReplayScheduler<&[u8], ManualClock>,
        clock: &ManualClock,
        model: &mut ReplayTerminal,
    ) -> Vec<f64> {
        let mut delays = Vec::new();
        while let Tick::Wait(wait) = scheduler.tick(model) {
            delays.push(scheduler.last_delay().unwrap());
            clock.advance(wait);
        }
        delays
    }

    fn assert_wait(tick: Tick, expected_ms: u64) {
        let Tick::Wait(wait) = tick else {
            panic!("expected a wait, got {tick:?}");
        };
        let diff = wait.as_secs_f64() - expected_ms as f64 / 1000.0;
        assert!(diff.abs() < 1e-6, "waited {wait:?}, expected {expected_ms}ms");
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn hello_scenario() {
        let log = hello_log();
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        let delays = run(&mut scheduler, &clock, &mut model);

        assert_close(&delays, &[0.0, 0.1, 0.15]);
        assert_eq!(scheduler.state(), SchedulerState::Finished);
        assert_eq!(model.size(), (80, 24));
        assert_eq!(model.grid().line(0), "Hello");
        assert!(model.grid().row(0).unwrap()[0].style.fg.is_default());
        assert_eq!(scheduler.stats().events, 3);
        assert_eq!(scheduler.stats().resizes, 1);
    }

    #[test]
    fn events_apply_on_the_tick_after_they_are_decoded() {
        let log = hello_log();
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        assert_wait(scheduler.tick(&mut model), 0);
        assert_eq!(scheduler.state(), SchedulerState::Playing);
        assert!(!model.is_sized());

        assert_wait(scheduler.tick(&mut model), 100);
        assert!(model.is_sized());
        assert_eq!(model.grid().line(0), "");

        clock.advance(Duration::from_millis(100));
        scheduler.tick(&mut model);
        assert_eq!(model.grid().line(0), "Hello");
    }

    #[test]
    fn logical_time_is_independent_of_jitter() {
        let log = encode(&[
            LogEvent::stdout(0, b"a".to_vec()),
            LogEvent::stdout(40, b"b".to_vec()),
            LogEvent::stdout(90, b"c".to_vec()),
            LogEvent::stdout(400, b"d".to_vec()),
        ]);
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        let jitter = [17u64, 3, 250, 0, 80];
        let mut delays = Vec::new();
        let mut i = 0;
        while let Tick::Wait(wait) = scheduler.tick(&mut model) {
            delays.push(scheduler.last_delay().unwrap());
            clock.advance(wait + Duration::from_millis(jitter[i % jitter.len()]));
            i += 1;
        }

        let sum: f64 = delays.iter().sum();
        assert_close(&delays, &[0.0, 0.04, 0.05, 0.31]);
        let logical = scheduler.schedule().unwrap().logical_elapsed_s;
        assert!((logical - sum).abs() < 1e-9);
    }

    #[test]
    fn running_behind_collapses_wait_to_zero() {
        let log = encode(&[
            LogEvent::stdout(0, b"a".to_vec()),
            LogEvent::stdout(100, b"b".to_vec()),
            LogEvent::stdout(200, b"c".to_vec()),
        ]);
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        scheduler.tick(&mut model);
        // Stall far past both remaining events
        clock.advance(Duration::from_secs(5));
        assert_eq!(scheduler.tick(&mut model), Tick::Wait(Duration::ZERO));
        assert_eq!(scheduler.tick(&mut model), Tick::Wait(Duration::ZERO));
    }

    #[test]
    fn wait_tracks_logical_time_not_last_delay() {
        let log = encode(&[
            LogEvent::stdout(0, b"a".to_vec()),
            LogEvent::stdout(100, b"b".to_vec()),
            LogEvent::stdout(200, b"c".to_vec()),
        ]);
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        scheduler.tick(&mut model);
        scheduler.tick(&mut model);
        // Woke up 30ms late for the second event
        clock.advance(Duration::from_millis(130));
        assert_wait(scheduler.tick(&mut model), 70);
    }

    #[test]
    fn backwards_timestamp_contributes_no_delay() {
        let log = encode(&[
            LogEvent::stdout(500, b"a".to_vec()),
            LogEvent::stdout(200, b"b".to_vec()),
            LogEvent::stdout(300, b"c".to_vec()),
        ]);
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        let delays = run(&mut scheduler, &clock, &mut model);
        assert_close(&delays, &[0.0, 0.0, 0.1]);
        assert_eq!(model.grid().line(0), "abc");
    }

    #[test]
    fn speed_and_idle_limit_adjust_delays() {
        let log = encode(&[
            LogEvent::stdout(0, b"a".to_vec()),
            LogEvent::stdout(1000, b"b".to_vec()),
            LogEvent::stdout(61_000, b"c".to_vec()),
        ]);
        let clock = ManualClock::new();
        let options = ReplayOptions {
            speed: 2.0,
            idle_time_limit: Some(2.0),
        };
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), options);
        let mut model = ReplayTerminal::new();

        let delays = run(&mut scheduler, &clock, &mut model);
        assert_close(&delays, &[0.0, 0.5, 2.0]);
    }

    #[test]
    fn malformed_size_change_is_skipped() {
        let log = encode(&[
            LogEvent::new(EventKind::SizeChange, 0, vec![24, 0, 80]),
            LogEvent::stdout(10, b"still here".to_vec()),
        ]);
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        run(&mut scheduler, &clock, &mut model);
        assert!(scheduler.is_finished());
        assert_eq!(model.size(), (80, 24));
        assert_eq!(model.grid().line(0), "still here");
        assert_eq!(scheduler.stats().skipped, 1);
        assert_eq!(scheduler.stats().events, 1);
    }

    #[test]
    fn stdin_goes_to_virtual_queue() {
        let log = encode(&[
            LogEvent::stdin(0, b"ls\r".to_vec()),
            LogEvent::stdout(5, b"file".to_vec()),
        ]);
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        run(&mut scheduler, &clock, &mut model);
        assert_eq!(model.drain_input(), b"ls\r");
        assert_eq!(scheduler.stats().input_bytes, 3);
        assert_eq!(model.grid().line(0), "file");
    }

    #[test]
    fn truncated_final_frame_finishes_cleanly() {
        let mut log = hello_log();
        log.truncate(log.len() - 1);
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock.clone(), ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        let delays = run(&mut scheduler, &clock, &mut model);
        assert_close(&delays, &[0.0, 0.1]);
        assert_eq!(scheduler.state(), SchedulerState::Finished);
        assert_eq!(model.grid().line(0), "Hello");
        assert_eq!(scheduler.stats().skipped, 0);
        assert!(matches!(
            scheduler.end_of_stream(),
            Some(EndOfStream::TruncatedPayload { .. })
        ));
    }

    #[test]
    fn empty_log_finishes_on_first_tick() {
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(std::io::empty()), clock, ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        assert_eq!(scheduler.tick(&mut model), Tick::Finished);
        assert_eq!(scheduler.state(), SchedulerState::Finished);
        assert_eq!(scheduler.tick(&mut model), Tick::Finished);
    }

    #[test]
    fn finish_stops_playback() {
        let log = hello_log();
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock, ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        scheduler.tick(&mut model);
        scheduler.finish();
        assert_eq!(scheduler.tick(&mut model), Tick::Finished);
        assert_eq!(scheduler.stats().events, 0);
    }

    #[test]
    fn alternating_extreme_timestamps_saturate_wait() {
        let events: Vec<LogEvent> = (0..10_000)
            .map(|i| {
                let ts = if i % 2 == 0 { i64::MIN } else { i64::MAX };
                LogEvent::stdout(ts, b"x".to_vec())
            })
            .collect();
        let log = encode(&events);
        let clock = ManualClock::new();
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), clock, ReplayOptions::default());
        let mut model = ReplayTerminal::new();

        let mut last = Duration::ZERO;
        while let Tick::Wait(wait) = scheduler.tick(&mut model) {
            last = wait;
        }
        assert_eq!(last, Duration::MAX);
        assert_eq!(scheduler.state(), SchedulerState::Finished);
        assert_eq!(scheduler.stats().events, 10_000);
    }

    #[test]
    fn tiny_speed_saturates_wait() {
        let log = encode(&[
            LogEvent::stdout(0, b"a".to_vec()),
            LogEvent::stdout(1000, b"b".to_vec()),
        ]);
        let options = ReplayOptions {
            speed: 1e-300,
            idle_time_limit: None,
        };
        let mut scheduler =
            ReplayScheduler::with_clock(LogReader::new(log.as_slice()), ManualClock::new(), options);
        let mut model = ReplayTerminal::new();

        assert_wait(scheduler.tick(&mut model), 0);
        assert_eq!(scheduler.tick(&mut model), Tick::Wait(Duration::MAX));
    }

    #[test]
    fn adjust_handles_degenerate_options() {
        let options = ReplayOptions {
            speed: 0.0,
            idle_time_limit: None,
        };
        assert_eq!(options.adjust(1.5), 1.5);
        assert_eq!(ReplayOptions::default().adjust(-3.0), 0.0);
    }
}
