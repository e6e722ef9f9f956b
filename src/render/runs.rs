//! Style run segmentation.
//!
//! Splits a row of cells into maximal runs that can be drawn with one
//! primitive each.

use crate::terminal::{Cell, CellStyle};

/// A contiguous stretch of cells drawn with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRun {
    /// Glyphs of the run, spacers and newlines removed
    pub text: String,
    pub style: CellStyle,
    /// Column of the first cell in the run
    pub start_column: usize,
    /// Number of cells covered, spacers included
    pub cell_count: usize,
}

impl StyleRun {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Cells share a run when bold, foreground and background all match.
///
/// Italic is deliberately not part of the key: it is taken from the last
/// cell of each run.
fn same_run(a: &CellStyle, b: &CellStyle) -> bool {
    a.bold == b.bold && a.fg == b.fg && a.bg == b.bg
}

/// Segment one row into style runs, left to right.
///
/// The runs cover the row with no gaps or overlaps, and no two adjacent
/// runs could have been merged.
pub fn segment_row(row: &[Cell]) -> Vec<StyleRun> {
    let mut runs: Vec<StyleRun> = Vec::new();

    for (column, cell) in row.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if same_run(&run.style, &cell.style) => {
                run.style.italic = cell.style.italic;
                run.cell_count += 1;
                push_glyph(&mut run.text, cell);
            }
            _ => {
                let mut text = String::new();
                push_glyph(&mut text, cell);
                runs.push(StyleRun {
                    text,
                    style: cell.style,
                    start_column: column,
                    cell_count: 1,
                });
            }
        }
    }

    runs
}

fn push_glyph(text: &mut String, cell: &Cell) {
    if let Some(ch) = cell.glyph() {
        if ch != '\n' {
            text.push(ch);
        }
    }
}
