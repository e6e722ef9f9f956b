//! Log-driven terminal backend.

use std::collections::VecDeque;

use tracing::debug;

use super::buffer::TerminalBuffer;
use super::error::TerminalError;
use super::provider::{Capabilities, TerminalProvider};
use super::rewrite::AltScreenRewriter;
use super::types::TerminalGrid;

/// Grid size used until the log announces one.
pub const DEFAULT_COLUMNS: usize = 80;
pub const DEFAULT_ROWS: usize = 24;

/// Read-only terminal fed from a session log.
///
/// Recorded keystrokes are never sent anywhere; they collect in a virtual
/// stdin queue that callers may inspect with [`drain_input`](Self::drain_input).
pub struct ReplayTerminal {
    buffer: TerminalBuffer,
    rewriter: AltScreenRewriter,
    stdin: VecDeque<Vec<u8>>,
    sized: bool,
    open: bool,
}

impl ReplayTerminal {
    /// A terminal with the default 80x24 grid, waiting for the log's first
    /// size change.
    pub fn new() -> Self {
        Self::build(DEFAULT_COLUMNS, DEFAULT_ROWS, false)
    }

    /// A terminal pre-sized by the caller.
    pub fn with_size(columns: usize, rows: usize) -> Self {
        Self::build(columns, rows, true)
    }

    fn build(columns: usize, rows: usize, sized: bool) -> Self {
        Self {
            buffer: TerminalBuffer::new(columns, rows),
            rewriter: AltScreenRewriter::new(),
            stdin: VecDeque::new(),
            sized,
            open: true,
        }
    }

    /// True once a size was given, either up front or by the log.
    pub fn is_sized(&self) -> bool {
        self.sized
    }

    /// Take everything recorded as typed input so far, oldest first.
    pub fn drain_input(&mut self) -> Vec<u8> {
        self.stdin.drain(..).flatten().collect()
    }

    /// Number of input chunks waiting in the virtual stdin queue.
    pub fn pending_input(&self) -> usize {
        self.stdin.len()
    }

    /// Mark the session as over. Later output is rejected.
    pub fn close(&mut self) {
        let tail = self.rewriter.flush();
        if !tail.is_empty() {
            self.buffer.process(&tail);
        }
        self.open = false;
    }

    pub fn buffer(&self) -> &TerminalBuffer {
        &self.buffer
    }
}

impl Default for ReplayTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalProvider for ReplayTerminal {
    fn backend_name(&self) -> &'static str {
        "replay"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            interactive: false,
            cursor_control: false,
            recording: false,
        }
    }

    fn grid(&self) -> TerminalGrid<'_> {
        self.buffer.grid()
    }

    fn size(&self) -> (usize, usize) {
        (self.buffer.width(), self.buffer.height())
    }

    fn cursor(&self) -> (usize, usize) {
        (self.buffer.cursor_col(), self.buffer.cursor_row())
    }

    fn feed_output(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        if !self.open {
            return Err(TerminalError::Closed);
        }
        let rewritten = self.rewriter.rewrite(bytes);
        self.buffer.process(&rewritten);
        Ok(())
    }

    fn send_input(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        if !bytes.is_empty() {
            self.stdin.push_back(bytes.to_vec());
        }
        Ok(())
    }

    fn resize(&mut self, rows: usize, cols: usize) -> Result<(), TerminalError> {
        if !self.sized {
            debug!(cols, rows, "Initial grid size from log");
        }
        self.buffer.resize(cols, rows);
        self.sized = true;
        Ok(())
    }

    fn set_cursor(&mut self, _x: usize, _y: usize) -> Result<(), TerminalError> {
        Err(TerminalError::UnsupportedOperation {
            backend: self.backend_name(),
            operation: "set_cursor",
        })
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn update(&mut self) -> Result<bool, TerminalError> {
        Ok(false)
    }
}
