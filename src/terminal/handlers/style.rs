//! SGR (Select Graphic Rendition) handler.
//!
//! Handles CSI m sequence for text styling:
//! - Reset (0)
//! - Bold, italic, reverse (1, 3, 7) and their resets (22, 23, 27)
//! - Standard foreground/background colors (30-37, 40-47)
//! - Extended colors - 256-color mode (38;5;n, 48;5;n)
//! - Extended colors - RGB mode (38;2;r;g;b, 48;2;r;g;b)
//! - Bright foreground/background colors (90-97, 100-107)
//!
//! Attributes the renderer cannot show (dim, underline, blink, ...) are
//! accepted and ignored.

use vte::Params;

use crate::terminal::screen::Screen;
use crate::terminal::types::{CellStyle, Color};

/// Apply an SGR sequence to the screen's pen.
pub fn handle_sgr(screen: &mut Screen, params: &Params) {
    let groups: Vec<&[u16]> = params.iter().collect();
    if groups.is_empty() {
        reset(screen);
        return;
    }

    let mut i = 0;
    while i < groups.len() {
        let group = groups[i];
        let code = group.first().copied().unwrap_or(0);
        match code {
            0 => reset(screen),
            1 => screen.pen.bold = true,
            3 => screen.pen.italic = true,
            7 => screen.reverse = true,
            22 => screen.pen.bold = false,
            23 => screen.pen.italic = false,
            27 => screen.reverse = false,
            30..=37 => screen.pen.fg = Color::from_index((code - 30) as u8),
            39 => screen.pen.fg = Color::Default,
            40..=47 => screen.pen.bg = Color::from_index((code - 40) as u8),
            49 => screen.pen.bg = Color::Default,
            90..=97 => screen.pen.fg = Color::from_index((code - 90 + 8) as u8),
            100..=107 => screen.pen.bg = Color::from_index((code - 100 + 8) as u8),
            38 | 48 => {
                let color = if group.len() > 1 {
                    colon_color(&group[1..])
                } else {
                    let rest: Vec<u16> = groups[i + 1..]
                        .iter()
                        .map(|g| g.first().copied().unwrap_or(0))
                        .collect();
                    let (color, consumed) = semicolon_color(&rest);
                    i += consumed;
                    color
                };
                if let Some(color) = color {
                    if code == 38 {
                        screen.pen.fg = color;
                    } else {
                        screen.pen.bg = color;
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }
}

fn reset(screen: &mut Screen) {
    screen.pen = CellStyle::default();
    screen.reverse = false;
}

fn clamp(v: u16) -> u8 {
    v.min(255) as u8
}

/// Decode `5;n` or `2;r;g;b` spread over separate parameters.
///
/// Returns the color and how many parameters it used.
fn semicolon_color(values: &[u16]) -> (Option<Color>, usize) {
    match values {
        [5, n, ..] => (Some(Color::from_index(clamp(*n))), 2),
        [2, r, g, b, ..] => (Some(Color::Rgb(clamp(*r), clamp(*g), clamp(*b))), 4),
        [] => (None, 0),
        _ => (None, values.len()),
    }
}

/// Decode `5:n` or `2:[colorspace:]r:g:b` packed into one parameter group.
fn colon_color(values: &[u16]) -> Option<Color> {
    match values {
        [5, n, ..] => Some(Color::from_index(clamp(*n))),
        [2, _, r, g, b, ..] | [2, r, g, b] => Some(Color::Rgb(clamp(*r), clamp(*g), clamp(*b))),
        _ => None,
    }
}
