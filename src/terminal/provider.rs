//! Backend-independent terminal interface.
//!
//! Both the live backend and the replay backend expose the same queries;
//! what differs is which mutations they accept. [`Capabilities`] lets a
//! caller check up front, and unsupported calls fail with
//! [`TerminalError::UnsupportedOperation`] instead of silently doing
//! nothing.

use super::error::TerminalError;
use super::live::LiveTerminal;
use super::replay::ReplayTerminal;
use super::types::TerminalGrid;

/// What a backend can do beyond the shared queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Input reaches a real process
    pub interactive: bool,
    /// `set_cursor` is honoured
    pub cursor_control: bool,
    /// Traffic is being written to a session log
    pub recording: bool,
}

/// A terminal that owns a grid, a cursor and a size.
///
/// Queries are pure reads. Mutations go through `feed_output`, `send_input`,
/// `resize` and `set_cursor`.
pub trait TerminalProvider {
    /// Short name used in errors and logs.
    fn backend_name(&self) -> &'static str;

    fn capabilities(&self) -> Capabilities;

    /// Borrow the current screen.
    fn grid(&self) -> TerminalGrid<'_>;

    /// Grid size as (columns, rows).
    fn size(&self) -> (usize, usize);

    /// Cursor position as (x, y).
    fn cursor(&self) -> (usize, usize);

    /// Parse program output into the grid.
    fn feed_output(&mut self, bytes: &[u8]) -> Result<(), TerminalError>;

    /// Deliver input bytes, as if typed.
    fn send_input(&mut self, bytes: &[u8]) -> Result<(), TerminalError>;

    /// Change the grid size. Zero dimensions are clamped to 1.
    fn resize(&mut self, rows: usize, cols: usize) -> Result<(), TerminalError>;

    /// Move the cursor to (x, y).
    fn set_cursor(&mut self, x: usize, y: usize) -> Result<(), TerminalError>;

    fn is_open(&self) -> bool;

    /// Pull in anything that arrived asynchronously.
    ///
    /// Returns `true` when the grid changed.
    fn update(&mut self) -> Result<bool, TerminalError>;
}

/// The two terminal backends behind one type.
pub enum Backend {
    Live(LiveTerminal),
    Replay(ReplayTerminal),
}

macro_rules! delegate {
    ($self:ident, $term:ident => $call:expr) => {
        match $self {
            Backend::Live($term) => $call,
            Backend::Replay($term) => $call,
        }
    };
}

impl TerminalProvider for Backend {
    fn backend_name(&self) -> &'static str {
        delegate!(self, t => t.backend_name())
    }

    fn capabilities(&self) -> Capabilities {
        delegate!(self, t => t.capabilities())
    }

    fn grid(&self) -> TerminalGrid<'_> {
        delegate!(self, t => t.grid())
    }

    fn size(&self) -> (usize, usize) {
        delegate!(self, t => t.size())
    }

    fn cursor(&self) -> (usize, usize) {
        delegate!(self, t => t.cursor())
    }

    fn feed_output(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        delegate!(self, t => t.feed_output(bytes))
    }

    fn send_input(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        delegate!(self, t => t.send_input(bytes))
    }

    fn resize(&mut self, rows: usize, cols: usize) -> Result<(), TerminalError> {
        delegate!(self, t => t.resize(rows, cols))
    }

    fn set_cursor(&mut self, x: usize, y: usize) -> Result<(), TerminalError> {
        delegate!(self, t => t.set_cursor(x, y))
    }

    fn is_open(&self) -> bool {
        delegate!(self, t => t.is_open())
    }

    fn update(&mut self) -> Result<bool, TerminalError> {
        delegate!(self, t => t.update())
    }
}

impl From<LiveTerminal> for Backend {
    fn from(terminal: LiveTerminal) -> Self {
        Backend::Live(terminal)
    }
}

impl From<ReplayTerminal> for Backend {
    fn from(terminal: ReplayTerminal) -> Self {
        Backend::Replay(terminal)
    }
}
