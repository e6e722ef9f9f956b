//! Frame rendering.
//!
//! Turns a [`TerminalGrid`] into draw calls on a [`Surface`]:
//! - Each row is split into style runs
//! - Each non-empty run is drawn through a pooled [`Label`]
//! - Runs with a non-default background get a filled rectangle behind them
//! - The cursor is drawn last, on top of everything

use tracing::trace;

use super::palette::Palette;
use super::pool::LabelPool;
use super::runs::segment_row;
use super::surface::Surface;
use crate::terminal::{Cell, TerminalGrid};

/// Glyphs that fonts draw wider than they measure, with the extra advance
/// in reference pixels.
pub const WIDE_GLYPH_COMPENSATION: [(char, f32); 2] = [('\u{F111}', 6.0), ('\u{E61E}', 2.0)];

/// Cursor block width in reference pixels.
pub const CURSOR_WIDTH: f32 = 9.0;

/// Extra advance for a run, in reference pixels.
///
/// Each listed glyph counts once per run, however often it appears.
pub fn wide_glyph_compensation(text: &str) -> f32 {
    WIDE_GLYPH_COMPENSATION
        .iter()
        .filter(|(glyph, _)| text.contains(*glyph))
        .map(|(_, extra)| extra)
        .sum()
}

/// What one frame cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub labels_drawn: usize,
    pub rects_drawn: usize,
    /// Label attribute updates made during this frame
    pub label_updates: u64,
}

/// Draws terminal grids, reusing labels between frames.
#[derive(Debug)]
pub struct FrameRenderer {
    pool: LabelPool,
    palette: Palette,
    show_cursor: bool,
    grid_size: Option<(usize, usize)>,
}

impl FrameRenderer {
    pub fn new(palette: Palette, show_cursor: bool) -> Self {
        Self {
            pool: LabelPool::new(),
            palette,
            show_cursor,
            grid_size: None,
        }
    }

    pub fn pool(&self) -> &LabelPool {
        &self.pool
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Draw one frame.
    pub fn render<S: Surface>(&mut self, grid: &TerminalGrid<'_>, surface: &mut S) -> FrameStats {
        let size = (grid.columns, grid.height());
        if self.grid_size != Some(size) {
            if self.grid_size.is_some() {
                trace!(columns = size.0, rows = size.1, "Grid resized, clearing label pool");
            }
            self.pool.clear();
            self.grid_size = Some(size);
        }

        surface.clear(self.palette.background);
        let scale = surface.compensation_scale();
        let mut stats = FrameStats::default();

        for (row_idx, row) in grid.rows.iter().enumerate() {
            let mut x = 0.0;
            let mut slot = 0;

            for run in segment_row(row) {
                if run.is_empty() {
                    continue;
                }

                let label = self.pool.get_or_insert(row_idx, slot);
                stats.label_updates += label.update(
                    &run.text,
                    self.palette.fg(run.style.fg),
                    run.style.bold,
                    run.style.italic,
                    |text| surface.measure(text),
                ) as u64;

                let advance = label.content_width() + wide_glyph_compensation(&run.text) * scale;
                if !run.style.bg.is_default() {
                    surface.fill_rect(x, row_idx, advance, self.palette.bg(run.style.bg));
                    stats.rects_drawn += 1;
                }
                surface.draw_label(label, x, row_idx);
                stats.labels_drawn += 1;

                x += advance;
                slot += 1;
            }
        }

        if self.show_cursor {
            self.draw_cursor(grid, surface);
        }

        stats
    }

    fn draw_cursor<S: Surface>(&self, grid: &TerminalGrid<'_>, surface: &mut S) {
        let (cursor_x, cursor_y) = grid.cursor;
        let Some(row) = grid.row(cursor_y) else {
            return;
        };
        let prefix = text_before(row, cursor_x);
        let x = surface.measure(&prefix);
        surface.draw_cursor(x, cursor_y, CURSOR_WIDTH * surface.compensation_scale(), self.palette.cursor);
    }
}

/// Glyphs of the cells left of `column`.
fn text_before(row: &[Cell], column: usize) -> String {
    row.iter()
        .take(column)
        .filter_map(Cell::glyph)
        .filter(|&c| c != '\n')
        .collect()
}
