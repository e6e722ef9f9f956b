//! Virtual terminal emulator module.
//!
//! Provides a VTE-based terminal buffer and the two backends built on it:
//! - [`ReplayTerminal`]: read-only, fed from a session log
//! - [`LiveTerminal`]: attached to a running process
//!
//! Both implement [`TerminalProvider`]; [`Backend`] holds either one.
//! Escape sequence coverage is limited to what recordings need to stay
//! legible: cursor motion, erase, insert/delete, scroll regions and SGR.

mod buffer;
mod error;
mod handlers;
mod live;
mod performer;
mod provider;
mod replay;
mod rewrite;
mod screen;
pub mod types;

#[cfg(test)]
mod tests;

pub use buffer::TerminalBuffer;
pub use error::TerminalError;
pub use live::LiveTerminal;
pub use provider::{Backend, Capabilities, TerminalProvider};
pub use replay::{ReplayTerminal, DEFAULT_COLUMNS, DEFAULT_ROWS};
pub use rewrite::AltScreenRewriter;
pub use types::{row_text, Cell, CellStyle, Color, NamedColor, TerminalGrid};
