//! Terminal data types.
//!
//! Contains the core data structures for representing terminal state:
//! - Color: default, one of the 16 named ANSI colors, or RGB
//! - CellStyle: Text attributes carried per cell
//! - Cell: A single character with its style
//! - TerminalGrid: A borrowed view of the screen handed to the renderer

/// The 16 standard ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    /// All named colors, in ANSI index order.
    pub const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
        NamedColor::BrightBlack,
        NamedColor::BrightRed,
        NamedColor::BrightGreen,
        NamedColor::BrightYellow,
        NamedColor::BrightBlue,
        NamedColor::BrightMagenta,
        NamedColor::BrightCyan,
        NamedColor::BrightWhite,
    ];

    /// Map an ANSI palette index (0-15) to its named color.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Palette name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Blue => "blue",
            NamedColor::Magenta => "magenta",
            NamedColor::Cyan => "cyan",
            NamedColor::White => "white",
            NamedColor::BrightBlack => "grey",
            NamedColor::BrightRed => "lightred",
            NamedColor::BrightGreen => "lightgreen",
            NamedColor::BrightYellow => "lightyellow",
            NamedColor::BrightBlue => "lightblue",
            NamedColor::BrightMagenta => "lightmagenta",
            NamedColor::BrightCyan => "lightcyan",
            NamedColor::BrightWhite => "highwhite",
        }
    }

    /// Look up a color by its palette name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Whatever the renderer uses as default foreground/background
    #[default]
    Default,
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

impl Color {
    /// Convert an xterm 256-color palette index.
    ///
    /// Indices 0-15 become named colors; the 6x6x6 cube and the grayscale
    /// ramp are resolved to RGB.
    pub fn from_index(index: u8) -> Self {
        if let Some(named) = NamedColor::from_index(index) {
            return Color::Named(named);
        }
        if index < 232 {
            let i = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            Color::Rgb(level(i / 36), level((i / 6) % 6), level(i % 6))
        } else {
            let gray = 8 + (index - 232) * 10;
            Color::Rgb(gray, gray, gray)
        }
    }

    /// Parse a color spec: `default`, a palette name, or six hex digits.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.eq_ignore_ascii_case("default") {
            return Some(Color::Default);
        }
        if let Some(named) = NamedColor::from_name(&spec.to_ascii_lowercase()) {
            return Some(Color::Named(named));
        }

        let hex = spec.strip_prefix('#').unwrap_or(spec);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }
}

/// Visual attributes of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    /// Display width: 1 for normal glyphs, 2 for the leading half of a
    /// double-width glyph, 0 for the spacer that follows it
    pub width: u8,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellStyle::default())
    }
}

impl Cell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self {
            ch,
            width: 1,
            style,
        }
    }

    /// An empty cell, keeping the background of `style`.
    pub fn blank(style: CellStyle) -> Self {
        Self::new(' ', style)
    }

    /// The trailing half of a double-width glyph.
    pub fn spacer(style: CellStyle) -> Self {
        Self {
            ch: ' ',
            width: 0,
            style,
        }
    }

    /// The character drawn for this cell, or `None` for a spacer.
    pub fn glyph(&self) -> Option<char> {
        (self.width > 0).then_some(self.ch)
    }
}

/// Concatenate the glyphs of a row, skipping spacers.
pub fn row_text(row: &[Cell]) -> String {
    row.iter().filter_map(Cell::glyph).collect()
}

/// A borrowed snapshot of the screen, valid for one frame.
#[derive(Debug, Clone, Copy)]
pub struct TerminalGrid<'a> {
    pub rows: &'a [Vec<Cell>],
    pub columns: usize,
    /// Cursor as (column, row)
    pub cursor: (usize, usize),
}

impl<'a> TerminalGrid<'a> {
    pub fn row(&self, index: usize) -> Option<&'a [Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Text of a row, trailing blanks removed.
    pub fn line(&self, index: usize) -> String {
        self.row(index)
            .map(|row| row_text(row).trim_end().to_string())
            .unwrap_or_default()
    }
}
