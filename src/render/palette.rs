//! Color resolution.
//!
//! Maps terminal cell colors to concrete RGB through a fixed table for the
//! 16 named colors. RGB cell colors pass through unchanged.

use crate::terminal::{Color, NamedColor};

/// A concrete 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const CYAN: Rgb = Rgb(0x00, 0xFF, 0xFF);
}

impl From<Rgb> for ratatui::style::Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        ratatui::style::Color::Rgb(r, g, b)
    }
}

/// RGB value of a named color.
pub fn named_rgb(color: NamedColor) -> Rgb {
    match color {
        NamedColor::Black => Rgb(0x00, 0x00, 0x00),
        NamedColor::Red => Rgb(0x80, 0x00, 0x00),
        NamedColor::Green => Rgb(0x00, 0x80, 0x00),
        NamedColor::Yellow => Rgb(0x80, 0x80, 0x00),
        NamedColor::Blue => Rgb(0x00, 0x00, 0x80),
        NamedColor::Magenta => Rgb(0x80, 0x00, 0x80),
        NamedColor::Cyan => Rgb(0x00, 0x80, 0x80),
        NamedColor::White => Rgb(0xC0, 0xC0, 0xC0),
        NamedColor::BrightBlack => Rgb(0x80, 0x80, 0x80),
        NamedColor::BrightRed => Rgb(0xFF, 0x00, 0x00),
        NamedColor::BrightGreen => Rgb(0x00, 0xFF, 0x00),
        NamedColor::BrightYellow => Rgb(0xFF, 0xFF, 0x00),
        NamedColor::BrightBlue => Rgb(0x00, 0x00, 0xFF),
        NamedColor::BrightMagenta => Rgb(0xFF, 0x00, 0xFF),
        NamedColor::BrightCyan => Rgb(0x00, 0xFF, 0xFF),
        NamedColor::BrightWhite => Rgb(0xFF, 0xFF, 0xFF),
    }
}

/// Colors used to draw a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Used for cells with the default foreground
    pub foreground: Rgb,
    /// Used for cells with the default background, and to clear the frame
    pub background: Rgb,
    pub cursor: Rgb,
    /// FPS overlay text
    pub overlay: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgb::WHITE,
            background: Rgb::BLACK,
            cursor: Rgb::WHITE,
            overlay: Rgb::CYAN,
        }
    }
}

impl Palette {
    /// Build a palette from configured colors; `Color::Default` keeps the
    /// built-in value for that slot.
    pub fn from_colors(foreground: Color, background: Color, cursor: Color) -> Self {
        let base = Self::default();
        Self {
            foreground: resolve(foreground, base.foreground),
            background: resolve(background, base.background),
            cursor: resolve(cursor, base.cursor),
            overlay: base.overlay,
        }
    }

    pub fn fg(&self, color: Color) -> Rgb {
        resolve(color, self.foreground)
    }

    pub fn bg(&self, color: Color) -> Rgb {
        resolve(color, self.background)
    }
}

fn resolve(color: Color, default: Rgb) -> Rgb {
    match color {
        Color::Default => default,
        Color::Named(named) => named_rgb(named),
        Color::Rgb(r, g, b) => Rgb(r, g, b),
    }
}
