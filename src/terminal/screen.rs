//! Screen grid and cursor state.
//!
//! `Screen` owns the cell grid and implements the primitive operations that
//! escape sequence handlers are built from. Every operation keeps the grid
//! at exactly `height` rows of `width` cells and the cursor inside it.

use unicode_width::UnicodeWidthChar;

use super::types::{Cell, CellStyle, Color, NamedColor};

const TAB_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy)]
struct SavedCursor {
    col: usize,
    row: usize,
    pen: CellStyle,
    reverse: bool,
}

/// Screen contents plus the cursor and pen state that writes use.
#[derive(Debug, Clone)]
pub struct Screen {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
    cursor_col: usize,
    cursor_row: usize,
    /// Cursor sits past the last column; the next print wraps first
    pending_wrap: bool,
    saved: Option<SavedCursor>,
    pub(crate) pen: CellStyle,
    pub(crate) reverse: bool,
    pub(crate) auto_wrap: bool,
    /// Scroll region, inclusive, 0-based
    scroll_top: usize,
    scroll_bottom: usize,
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            rows: vec![vec![Cell::default(); width]; height],
            cursor_col: 0,
            cursor_row: 0,
            pending_wrap: false,
            saved: None,
            pen: CellStyle::default(),
            reverse: false,
            auto_wrap: true,
            scroll_top: 0,
            scroll_bottom: height - 1,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    /// Style written into cells, with reverse video applied.
    fn effective_style(&self) -> CellStyle {
        if !self.reverse {
            return self.pen;
        }
        let fg = match self.pen.bg {
            Color::Default => Color::Named(NamedColor::Black),
            other => other,
        };
        let bg = match self.pen.fg {
            Color::Default => Color::Named(NamedColor::BrightWhite),
            other => other,
        };
        CellStyle { fg, bg, ..self.pen }
    }

    /// Blank cell used when erasing: keeps the current background.
    fn blank(&self) -> Cell {
        Cell::blank(CellStyle {
            bg: self.effective_style().bg,
            ..CellStyle::default()
        })
    }

    fn blank_row(&self) -> Vec<Cell> {
        vec![self.blank(); self.width]
    }

    // === Writing ===

    /// Write a printable character at the cursor and advance.
    pub fn print(&mut self, c: char) {
        let char_width = match c.width() {
            Some(w) if w > 0 => w.min(2),
            // Combining marks and other zero-width code points are dropped
            _ => return,
        };

        if self.pending_wrap {
            if self.auto_wrap {
                self.carriage_return();
                self.line_feed();
            }
            self.pending_wrap = false;
        }

        if char_width == 2 && self.cursor_col + 1 >= self.width {
            if self.width < 2 {
                return;
            }
            if self.auto_wrap {
                self.clear_cells(self.cursor_row, self.cursor_col, self.width);
                self.carriage_return();
                self.line_feed();
            } else {
                self.cursor_col = self.width - 2;
            }
        }

        let style = self.effective_style();
        let (row, col) = (self.cursor_row, self.cursor_col);
        self.break_wide_glyph(row, col);
        if char_width == 2 {
            self.break_wide_glyph(row, col + 1);
        }
        self.rows[row][col] = Cell {
            ch: c,
            width: char_width as u8,
            style,
        };
        if char_width == 2 {
            self.rows[row][col + 1] = Cell::spacer(style);
        }

        let next = col + char_width;
        if next >= self.width {
            self.cursor_col = self.width - 1;
            self.pending_wrap = true;
        } else {
            self.cursor_col = next;
        }
    }

    /// Blank the other half of a double-width glyph covering `col`.
    fn break_wide_glyph(&mut self, row: usize, col: usize) {
        let partner = match self.rows[row][col].width {
            0 => col.checked_sub(1),
            2 => Some(col + 1).filter(|&c| c < self.width),
            _ => None,
        };
        if let Some(partner) = partner {
            self.rows[row][partner] = self.blank();
        }
    }

    fn clear_cells(&mut self, row: usize, from: usize, to: usize) {
        let blank = self.blank();
        let to = to.min(self.width);
        if from < to {
            self.rows[row][from..to].fill(blank);
        }
    }

    // === Control characters ===

    pub fn carriage_return(&mut self) {
        self.cursor_col = 0;
        self.pending_wrap = false;
    }

    /// Move down one line, scrolling the region when at its bottom.
    pub fn line_feed(&mut self) {
        self.pending_wrap = false;
        if self.cursor_row == self.scroll_bottom {
            self.scroll_up(1);
        } else if self.cursor_row + 1 < self.height {
            self.cursor_row += 1;
        }
    }

    /// Move up one line, scrolling the region down when at its top.
    pub fn reverse_index(&mut self) {
        self.pending_wrap = false;
        if self.cursor_row == self.scroll_top {
            self.scroll_down(1);
        } else {
            self.cursor_row = self.cursor_row.saturating_sub(1);
        }
    }

    pub fn backspace(&mut self) {
        self.pending_wrap = false;
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn tab(&mut self) {
        let next = (self.cursor_col / TAB_WIDTH + 1) * TAB_WIDTH;
        self.cursor_col = next.min(self.width - 1);
    }

    // === Cursor movement ===

    /// Move to an absolute position (0-based), clamped to the screen.
    pub fn move_to(&mut self, row: usize, col: usize) {
        self.pending_wrap = false;
        self.cursor_row = row.min(self.height - 1);
        self.cursor_col = col.min(self.width - 1);
    }

    pub fn move_up(&mut self, n: usize) {
        let floor = if self.cursor_row >= self.scroll_top {
            self.scroll_top
        } else {
            0
        };
        let row = self.cursor_row.saturating_sub(n).max(floor);
        self.move_to(row, self.cursor_col);
    }

    pub fn move_down(&mut self, n: usize) {
        let ceiling = if self.cursor_row <= self.scroll_bottom {
            self.scroll_bottom
        } else {
            self.height - 1
        };
        let row = (self.cursor_row + n).min(ceiling);
        self.move_to(row, self.cursor_col);
    }

    pub fn move_forward(&mut self, n: usize) {
        self.move_to(self.cursor_row, self.cursor_col + n);
    }

    pub fn move_back(&mut self, n: usize) {
        self.move_to(self.cursor_row, self.cursor_col.saturating_sub(n));
    }

    pub fn save_cursor(&mut self) {
        self.saved = Some(SavedCursor {
            col: self.cursor_col,
            row: self.cursor_row,
            pen: self.pen,
            reverse: self.reverse,
        });
    }

    pub fn restore_cursor(&mut self) {
        match self.saved {
            Some(saved) => {
                self.pen = saved.pen;
                self.reverse = saved.reverse;
                self.move_to(saved.row, saved.col);
            }
            None => self.move_to(0, 0),
        }
    }

    // === Scrolling ===

    /// Set the scroll region from 0-based inclusive bounds and home the cursor.
    ///
    /// Invalid regions (top not above bottom) are ignored.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let bottom = bottom.min(self.height - 1);
        if top >= bottom {
            return;
        }
        self.scroll_top = top;
        self.scroll_bottom = bottom;
        self.move_to(0, 0);
    }

    /// Scroll the region up: lines leave at the top, blanks enter at the bottom.
    pub fn scroll_up(&mut self, n: usize) {
        let span = self.scroll_bottom - self.scroll_top + 1;
        let n = n.min(span);
        for _ in 0..n {
            self.rows.remove(self.scroll_top);
            let blank = self.blank_row();
            self.rows.insert(self.scroll_bottom, blank);
        }
    }

    /// Scroll the region down: blanks enter at the top.
    pub fn scroll_down(&mut self, n: usize) {
        let span = self.scroll_bottom - self.scroll_top + 1;
        let n = n.min(span);
        for _ in 0..n {
            self.rows.remove(self.scroll_bottom);
            let blank = self.blank_row();
            self.rows.insert(self.scroll_top, blank);
        }
    }

    // === Editing ===

    /// ED: 0 = cursor to end, 1 = start to cursor, 2/3 = whole screen.
    pub fn erase_in_display(&mut self, mode: u16) {
        match mode {
            0 => {
                self.erase_in_line(0);
                for row in self.cursor_row + 1..self.height {
                    self.clear_cells(row, 0, self.width);
                }
            }
            1 => {
                for row in 0..self.cursor_row {
                    self.clear_cells(row, 0, self.width);
                }
                self.erase_in_line(1);
            }
            2 | 3 => {
                for row in 0..self.height {
                    self.clear_cells(row, 0, self.width);
                }
            }
            _ => {}
        }
    }

    /// EL: 0 = cursor to end, 1 = start to cursor, 2 = whole line.
    pub fn erase_in_line(&mut self, mode: u16) {
        let row = self.cursor_row;
        match mode {
            0 => self.clear_cells(row, self.cursor_col, self.width),
            1 => self.clear_cells(row, 0, self.cursor_col + 1),
            2 => self.clear_cells(row, 0, self.width),
            _ => {}
        }
    }

    /// ECH: blank `n` cells starting at the cursor without moving anything.
    pub fn erase_chars(&mut self, n: usize) {
        self.clear_cells(self.cursor_row, self.cursor_col, self.cursor_col + n);
    }

    /// DCH: delete `n` cells at the cursor, shifting the rest of the line left.
    pub fn delete_chars(&mut self, n: usize) {
        let blank = self.blank();
        let col = self.cursor_col;
        let n = n.min(self.width - col);
        let line = &mut self.rows[self.cursor_row];
        line.drain(col..col + n);
        line.extend(std::iter::repeat(blank).take(n));
    }

    /// ICH: insert `n` blanks at the cursor, shifting the rest of the line right.
    pub fn insert_blanks(&mut self, n: usize) {
        let blank = self.blank();
        let col = self.cursor_col;
        let n = n.min(self.width - col);
        let width = self.width;
        let line = &mut self.rows[self.cursor_row];
        line.splice(col..col, std::iter::repeat(blank).take(n));
        line.truncate(width);
    }

    /// IL: insert `n` blank lines at the cursor row, inside the scroll region.
    pub fn insert_lines(&mut self, n: usize) {
        if self.cursor_row < self.scroll_top || self.cursor_row > self.scroll_bottom {
            return;
        }
        let n = n.min(self.scroll_bottom - self.cursor_row + 1);
        for _ in 0..n {
            self.rows.remove(self.scroll_bottom);
            let blank = self.blank_row();
            self.rows.insert(self.cursor_row, blank);
        }
        self.carriage_return();
    }

    /// DL: delete `n` lines at the cursor row, inside the scroll region.
    pub fn delete_lines(&mut self, n: usize) {
        if self.cursor_row < self.scroll_top || self.cursor_row > self.scroll_bottom {
            return;
        }
        let n = n.min(self.scroll_bottom - self.cursor_row + 1);
        for _ in 0..n {
            self.rows.remove(self.cursor_row);
            let blank = self.blank_row();
            self.rows.insert(self.scroll_bottom, blank);
        }
        self.carriage_return();
    }

    // === Whole-screen state ===

    /// Resize the grid, keeping the bottom of the content around the cursor.
    ///
    /// When shrinking, rows are dropped from the top only as far as needed to
    /// keep the cursor row on screen; the rest are cut from the bottom.
    pub fn resize(&mut self, width: usize, height: usize) {
        let width = width.max(1);
        let height = height.max(1);

        if height < self.height {
            let drop_top = (self.cursor_row + 1).saturating_sub(height);
            self.rows.drain(..drop_top);
            self.rows.truncate(height);
            self.cursor_row -= drop_top;
        } else {
            let blank = vec![Cell::default(); self.width];
            self.rows.resize(height, blank);
        }

        for row in &mut self.rows {
            row.resize(width, Cell::default());
            // A wide glyph cut in half loses its spacer; blank it instead
            if let Some(last) = row.last_mut() {
                if last.width == 2 {
                    *last = Cell::default();
                }
            }
        }

        self.width = width;
        self.height = height;
        self.scroll_top = 0;
        self.scroll_bottom = height - 1;
        self.pending_wrap = false;
        self.cursor_row = self.cursor_row.min(height - 1);
        self.cursor_col = self.cursor_col.min(width - 1);
    }

    /// RIS: clear everything and reset all modes.
    pub fn reset(&mut self) {
        *self = Screen::new(self.width, self.height);
    }
}
