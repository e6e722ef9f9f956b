//! Terminal buffer: a vte parser driving a [`Screen`].

use std::fmt;

use super::performer::TerminalPerformer;
use super::screen::Screen;
use super::types::{row_text, Cell, TerminalGrid};

/// In-memory terminal emulator.
///
/// Feed it raw output bytes with [`process`](Self::process); read the
/// resulting grid back with [`grid`](Self::grid) or row by row. Escape
/// sequences split across calls are handled since the parser keeps its
/// state between them.
pub struct TerminalBuffer {
    parser: vte::Parser,
    screen: Screen,
}

impl TerminalBuffer {
    /// Create a blank buffer. Zero dimensions are clamped to 1.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            parser: vte::Parser::new(),
            screen: Screen::new(width, height),
        }
    }

    /// Apply a chunk of terminal output.
    pub fn process(&mut self, bytes: &[u8]) {
        let mut performer = TerminalPerformer {
            screen: &mut self.screen,
        };
        self.parser.advance(&mut performer, bytes);
    }

    /// Change the grid dimensions, keeping existing content where it fits.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.screen.resize(width, height);
    }

    /// Move the cursor to (column, row), clamped to the grid.
    pub fn set_cursor(&mut self, col: usize, row: usize) {
        self.screen.move_to(row, col);
    }

    pub fn width(&self) -> usize {
        self.screen.width()
    }

    pub fn height(&self) -> usize {
        self.screen.height()
    }

    pub fn cursor_row(&self) -> usize {
        self.screen.cursor_row()
    }

    pub fn cursor_col(&self) -> usize {
        self.screen.cursor_col()
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.screen.rows().get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        self.screen.rows()
    }

    /// Borrow the current contents as a renderable grid.
    pub fn grid(&self) -> TerminalGrid<'_> {
        TerminalGrid {
            rows: self.screen.rows(),
            columns: self.screen.width(),
            cursor: (self.screen.cursor_col(), self.screen.cursor_row()),
        }
    }
}

impl fmt::Display for TerminalBuffer {
    /// One line per row, trailing blanks trimmed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.screen.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row_text(row).trim_end())?;
        }
        Ok(())
    }
}

impl fmt::Debug for TerminalBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("cursor", &(self.cursor_col(), self.cursor_row()))
            .finish()
    }
}
