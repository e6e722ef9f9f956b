//! Session log player
//!
//! Replays a recorded session on the host terminal, or headless to get the
//! final screen.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: PlaybackState (loop deadlines, UI flags) and InputResult
//! - `input/`: Keyboard handling and the xterm key table
//! - `playback/`: Event scheduling, clocks and counters
//! - `session`: The single-threaded loop tying the pieces together
//!
//! # Usage
//!
//! ```no_run
//! use termreplay::player::{play_session, PlaybackResult, SessionOptions};
//! use std::path::Path;
//!
//! let result = play_session(Path::new("session.bin"), &SessionOptions::default()).unwrap();
//! match result {
//!     PlaybackResult::Finished(stats) => println!("Finished: {}", stats),
//!     PlaybackResult::Interrupted(stats) => println!("Stopped: {}", stats),
//! }
//! ```

pub mod input;
pub mod playback;
mod session;
pub mod state;

pub use playback::{PlaybackStats, ReplayOptions, ReplayScheduler, SchedulerState, Tick};
pub use session::{
    dump_final_screen, play_session, FinalScreen, PlaybackResult, SessionOptions,
};
pub use state::{InputResult, PlaybackState};
