//! Player state management
//!
//! Contains the `PlaybackState` struct that tracks the session loop's
//! deadlines, as well as shared types used across player modules.

use std::time::{Duration, Instant};

/// Longest pause the session loop schedules between two ticks.
pub const MAX_TICK_WAIT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the main
/// loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep playing
    Continue,
    /// Stop playback and leave the player
    Quit,
}

/// Deadlines and UI flags for the session loop.
///
/// The loop never blocks past `next_tick` or `next_frame`;
/// [`poll_timeout`](Self::poll_timeout) gives the time left until the
/// earlier of the two.
#[derive(Debug)]
pub struct PlaybackState {
    /// When the scheduler is due next, `None` once playback finished
    pub next_tick: Option<Instant>,
    /// When the next frame is due
    pub next_frame: Instant,
    /// Time between frames
    pub frame_interval: Duration,
    /// Whether the FPS overlay is drawn
    pub show_fps: bool,
    /// Keep the final frame up after playback finishes
    pub hold: bool,
    /// Set when the scheduler reports the end of the log
    pub finished: bool,
}

impl PlaybackState {
    /// Create the state for a session starting at `now`.
    ///
    /// `frame_rate` is clamped to at least one frame per second. The first
    /// tick and the first frame are both due immediately.
    pub fn new(now: Instant, frame_rate: u32, show_fps: bool, hold: bool) -> Self {
        Self {
            next_tick: Some(now),
            next_frame: now,
            frame_interval: Duration::from_secs(1) / frame_rate.max(1),
            show_fps,
            hold,
            finished: false,
        }
    }

    pub fn tick_due(&self, now: Instant) -> bool {
        self.next_tick.is_some_and(|at| at <= now)
    }

    pub fn frame_due(&self, now: Instant) -> bool {
        self.next_frame <= now
    }

    /// Schedule the next scheduler tick `wait` after `now`.
    ///
    /// Waits are capped at [`MAX_TICK_WAIT`] so the deadline stays
    /// representable.
    pub fn schedule_tick(&mut self, now: Instant, wait: Duration) {
        let wait = wait.min(MAX_TICK_WAIT);
        self.next_tick = Some(now.checked_add(wait).unwrap_or(now));
    }

    /// Record that the log is exhausted.
    pub fn finish(&mut self) {
        self.next_tick = None;
        self.finished = true;
    }

    /// Record a drawn frame and schedule the next one.
    ///
    /// A loop that fell behind resumes from `now` instead of drawing the
    /// missed frames back to back.
    pub fn frame_done(&mut self, now: Instant) {
        self.next_frame += self.frame_interval;
        if self.next_frame < now {
            self.next_frame = now + self.frame_interval;
        }
    }

    /// How long the loop may wait for input before something is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let deadline = match self.next_tick {
            Some(tick) => tick.min(self.next_frame),
            None => self.next_frame,
        };
        deadline.saturating_duration_since(now)
    }

    /// True when the loop should stop on its own.
    pub fn should_exit(&self) -> bool {
        self.finished && !self.hold
    }

    pub fn toggle_fps(&mut self) {
        self.show_fps = !self.show_fps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_and_frame_are_due_immediately() {
        let now = Instant::now();
        let state = PlaybackState::new(now, 30, true, false);
        assert!(state.tick_due(now));
        assert!(state.frame_due(now));
        assert_eq!(state.poll_timeout(now), Duration::ZERO);
    }

    #[test]
    fn poll_timeout_is_earliest_deadline() {
        let now = Instant::now();
        let mut state = PlaybackState::new(now, 10, true, false);
        state.frame_done(now);
        state.schedule_tick(now, Duration::from_millis(40));
        assert_eq!(state.poll_timeout(now), Duration::from_millis(40));

        state.schedule_tick(now, Duration::from_millis(500));
        assert_eq!(state.poll_timeout(now), Duration::from_millis(100));
    }

    #[test]
    fn finished_state_only_waits_for_frames() {
        let now = Instant::now();
        let mut state = PlaybackState::new(now, 20, false, true);
        state.frame_done(now);
        state.finish();
        assert!(!state.tick_due(now + Duration::from_secs(10)));
        assert_eq!(state.poll_timeout(now), Duration::from_millis(50));
    }

    #[test]
    fn late_frames_are_not_replayed() {
        let now = Instant::now();
        let mut state = PlaybackState::new(now, 10, false, false);
        let late = now + Duration::from_secs(2);
        state.frame_done(late);
        assert_eq!(state.next_frame, late + Duration::from_millis(100));
    }

    #[test]
    fn hold_keeps_loop_running() {
        let mut state = PlaybackState::new(Instant::now(), 30, false, true);
        state.finish();
        assert!(!state.should_exit());

        state.hold = false;
        assert!(state.should_exit());
    }

    #[test]
    fn huge_wait_is_capped() {
        let now = Instant::now();
        let mut state = PlaybackState::new(now, 30, false, false);
        state.schedule_tick(now, Duration::MAX);
        assert_eq!(state.next_tick, Some(now + MAX_TICK_WAIT));
        assert!(!state.tick_due(now + Duration::from_secs(3600)));
    }

    #[test]
    fn zero_frame_rate_is_clamped() {
        let state = PlaybackState::new(Instant::now(), 0, false, false);
        assert_eq!(state.frame_interval, Duration::from_secs(1));
    }
}
