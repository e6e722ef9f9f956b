//! Scroll region handlers.
//!
//! Handles CSI sequences:
//! - r: DECSTBM (Set Top and Bottom Margins)
//! - S: Scroll up
//! - T: Scroll down
//!
//! And ESC sequences:
//! - ESC D: Index
//! - ESC E: Next line
//! - ESC M: Reverse index

use super::count;
use crate::terminal::screen::Screen;

pub fn handle_csi(screen: &mut Screen, action: char, params: &[u16]) -> bool {
    match action {
        'r' => {
            let top = count(params, 0, 1) - 1;
            let bottom = count(params, 1, screen.height()) - 1;
            screen.set_scroll_region(top, bottom);
        }
        'S' => screen.scroll_up(count(params, 0, 1)),
        'T' => screen.scroll_down(count(params, 0, 1)),
        _ => return false,
    }
    true
}

pub fn handle_esc(screen: &mut Screen, byte: u8) -> bool {
    match byte {
        b'D' => screen.line_feed(),
        b'E' => {
            screen.carriage_return();
            screen.line_feed();
        }
        b'M' => screen.reverse_index(),
        _ => return false,
    }
    true
}
