//! Playback logic for the replay player.
//!
//! This module handles event scheduling, time sources and playback
//! counters.

mod clock;
mod scheduler;
mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{ReplayOptions, ReplayScheduler, ScheduleState, SchedulerState, Tick};
pub use stats::PlaybackStats;
