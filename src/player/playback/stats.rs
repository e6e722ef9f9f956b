//! Playback counters.

use std::fmt;

use humansize::{format_size, BINARY};

/// What a playback session did, for the end-of-session summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Events applied to the terminal
    pub events: u64,
    pub output_bytes: u64,
    pub input_bytes: u64,
    pub resizes: u64,
    /// Events dropped because they could not be applied
    pub skipped: u64,
}

impl fmt::Display for PlaybackStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events, {} output, {} input, {} resize{}, {} skipped",
            self.events,
            format_size(self.output_bytes, BINARY),
            format_size(self.input_bytes, BINARY),
            self.resizes,
            if self.resizes == 1 { "" } else { "s" },
            self.skipped
        )
    }
}
