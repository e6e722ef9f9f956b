//! Drawing surfaces.
//!
//! The frame renderer works in abstract horizontal units and whole rows.
//! A [`Surface`] decides what a unit is: [`CellSurface`] draws into a ratatui
//! buffer where one unit is one terminal column.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;

use super::label::Label;
use super::palette::Rgb;

/// Something a frame can be drawn onto.
pub trait Surface {
    /// Width of `text` as drawn, in surface units.
    fn measure(&self, text: &str) -> f32;

    /// Total drawable width, in surface units.
    fn width(&self) -> f32;

    /// Factor converting reference pixels into surface units.
    ///
    /// Surfaces whose glyph advance already matches the grid return 0.
    fn compensation_scale(&self) -> f32;

    /// Paint the whole surface.
    fn clear(&mut self, color: Rgb);

    /// Fill `width` units starting at `x` on `row`.
    fn fill_rect(&mut self, x: f32, row: usize, width: f32, color: Rgb);

    /// Draw a label's text starting at `x` on `row`.
    fn draw_label(&mut self, label: &Label, x: f32, row: usize);

    /// Draw the cursor block.
    fn draw_cursor(&mut self, x: f32, row: usize, width: f32, color: Rgb);
}

/// Surface backed by a ratatui [`Buffer`], one unit per column.
pub struct CellSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
}

impl<'a> CellSurface<'a> {
    /// Draw into `area` of `buffer`. Anything outside the area is clipped.
    pub fn new(buffer: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buffer.area);
        Self { buffer, area }
    }

    /// Buffer position of a surface coordinate, if it is visible.
    fn position(&self, x: f32, row: usize) -> Option<(u16, u16)> {
        let col = u16::try_from(x.max(0.0).round() as usize).ok()?;
        let row = u16::try_from(row).ok()?;
        (col < self.area.width && row < self.area.height)
            .then(|| (self.area.x + col, self.area.y + row))
    }

    fn columns(&self, x: f32, width: f32) -> usize {
        let start = x.max(0.0).round();
        let end = (x + width).max(0.0).round();
        (end - start).max(0.0) as usize
    }
}

impl Surface for CellSurface<'_> {
    fn measure(&self, text: &str) -> f32 {
        text.width() as f32
    }

    fn width(&self) -> f32 {
        self.area.width as f32
    }

    // Every glyph occupies whole columns, so runs stay on their grid cells
    fn compensation_scale(&self) -> f32 {
        0.0
    }

    fn clear(&mut self, color: Rgb) {
        let style = Style::reset().bg(color.into());
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_style(style);
                }
            }
        }
    }

    fn fill_rect(&mut self, x: f32, row: usize, width: f32, color: Rgb) {
        let Some((start, y)) = self.position(x, row) else {
            return;
        };
        let end = (start as usize + self.columns(x, width)).min(self.area.right() as usize) as u16;
        for col in start..end {
            if let Some(cell) = self.buffer.cell_mut((col, y)) {
                cell.set_bg(color.into());
            }
        }
    }

    fn draw_label(&mut self, label: &Label, x: f32, row: usize) {
        let Some((col, y)) = self.position(x, row) else {
            return;
        };
        let mut style = Style::default().fg(label.color().into());
        if label.bold() {
            style = style.add_modifier(Modifier::BOLD);
        }
        if label.italic() {
            style = style.add_modifier(Modifier::ITALIC);
        }
        let max_width = (self.area.right() - col) as usize;
        self.buffer.set_stringn(col, y, label.text(), max_width, style);
    }

    fn draw_cursor(&mut self, x: f32, row: usize, width: f32, color: Rgb) {
        let Some((start, y)) = self.position(x, row) else {
            return;
        };
        let columns = self.columns(x, width).max(1);
        let end = (start as usize + columns).min(self.area.right() as usize) as u16;
        for col in start..end {
            if let Some(cell) = self.buffer.cell_mut((col, y)) {
                let under = cell.bg;
                cell.set_bg(color.into());
                cell.set_fg(under);
            }
        }
    }
}
