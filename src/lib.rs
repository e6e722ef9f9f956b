//! termreplay - replay recorded terminal sessions
//!
//! A session log is a stream of timestamped frames: terminal size changes,
//! bytes typed into the session and bytes the session printed. This crate
//! decodes such logs, feeds them through a terminal screen model at the
//! recorded pace and draws the result on the host terminal.
//!
//! - `recording`: log frame decoder and encoder
//! - `terminal`: screen model and the replay/live terminal backends
//! - `player`: scheduler, session loop and headless dump
//! - `render`: style runs, primitive pool and frame drawing

pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod recording;
pub mod render;
pub mod terminal;

pub use config::Config;
pub use player::{dump_final_screen, play_session, PlaybackResult, SessionOptions};
pub use recording::{LogEvent, LogReader, LogWriter};
