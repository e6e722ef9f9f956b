//! Erase, insert and delete handlers.
//!
//! Handles CSI sequences:
//! - J: Erase in display
//! - K: Erase in line
//! - L/M: Insert/delete lines
//! - @/P: Insert/delete characters
//! - X: Erase characters

use super::{count, mode};
use crate::terminal::screen::Screen;

pub fn handle_csi(screen: &mut Screen, action: char, params: &[u16]) -> bool {
    match action {
        'J' => screen.erase_in_display(mode(params, 0)),
        'K' => screen.erase_in_line(mode(params, 0)),
        'L' => screen.insert_lines(count(params, 0, 1)),
        'M' => screen.delete_lines(count(params, 0, 1)),
        '@' => screen.insert_blanks(count(params, 0, 1)),
        'P' => screen.delete_chars(count(params, 0, 1)),
        'X' => screen.erase_chars(count(params, 0, 1)),
        _ => return false,
    }
    true
}
