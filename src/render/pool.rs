//! Label pool keyed by (row, slot).

use super::label::Label;

/// Labels kept alive between frames.
///
/// Slot `n` of a row holds the label for the row's `n`th drawn run. The pool
/// only grows: a frame with fewer runs leaves the extra labels in place for
/// later frames. [`clear`](Self::clear) drops everything, e.g. when the grid
/// changes size.
#[derive(Debug, Default)]
pub struct LabelPool {
    rows: Vec<Vec<Label>>,
}

impl LabelPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The label at (row, slot), allocated on first use.
    pub fn get_or_insert(&mut self, row: usize, slot: usize) -> &mut Label {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let labels = &mut self.rows[row];
        if labels.len() <= slot {
            labels.resize_with(slot + 1, Label::default);
        }
        &mut labels[slot]
    }

    pub fn get(&self, row: usize, slot: usize) -> Option<&Label> {
        self.rows.get(row)?.get(slot)
    }

    /// Total labels allocated.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
