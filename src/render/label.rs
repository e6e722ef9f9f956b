//! Reusable text primitive.

use super::palette::Rgb;

/// A drawable piece of text with its attributes.
///
/// Labels are kept across frames and only touched when something about them
/// changes. `changes` counts those updates so callers can tell how much work
/// a frame really did.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    color: Rgb,
    bold: bool,
    italic: bool,
    content_width: f32,
    changes: u64,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Rgb::WHITE,
            bold: false,
            italic: false,
            content_width: 0.0,
            changes: 0,
        }
    }
}

impl Label {
    /// Bring the label up to date.
    ///
    /// `measure` is only called when the text changed; the width is cached
    /// otherwise. Returns the number of attributes that changed.
    pub fn update(
        &mut self,
        text: &str,
        color: Rgb,
        bold: bool,
        italic: bool,
        measure: impl FnOnce(&str) -> f32,
    ) -> u32 {
        let mut changed = 0;
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
            self.content_width = measure(text);
            changed += 1;
        }
        if self.color != color {
            self.color = color;
            changed += 1;
        }
        if self.bold != bold {
            self.bold = bold;
            changed += 1;
        }
        if self.italic != italic {
            self.italic = italic;
            changed += 1;
        }
        self.changes += changed as u64;
        changed
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    /// Measured width of the text, in surface units.
    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Total attribute updates since creation.
    pub fn changes(&self) -> u64 {
        self.changes
    }
}
