//! Cursor movement handlers.
//!
//! Handles CSI sequences:
//! - A/B/C/D: Cursor up, down, forward, back
//! - E/F: Cursor next/previous line
//! - H/f: Cursor position
//! - G/`: Cursor horizontal absolute
//! - d: Cursor vertical absolute
//! - s/u: Save/restore cursor
//!
//! And ESC sequences:
//! - ESC 7: DEC save cursor
//! - ESC 8: DEC restore cursor

use super::count;
use crate::terminal::screen::Screen;

pub fn handle_csi(screen: &mut Screen, action: char, params: &[u16]) -> bool {
    match action {
        'A' => screen.move_up(count(params, 0, 1)),
        'B' | 'e' => screen.move_down(count(params, 0, 1)),
        'C' | 'a' => screen.move_forward(count(params, 0, 1)),
        'D' => screen.move_back(count(params, 0, 1)),
        'E' => {
            screen.move_down(count(params, 0, 1));
            screen.carriage_return();
        }
        'F' => {
            screen.move_up(count(params, 0, 1));
            screen.carriage_return();
        }
        'H' | 'f' => {
            let row = count(params, 0, 1) - 1;
            let col = count(params, 1, 1) - 1;
            screen.move_to(row, col);
        }
        'G' | '`' => screen.move_to(screen.cursor_row(), count(params, 0, 1) - 1),
        'd' => screen.move_to(count(params, 0, 1) - 1, screen.cursor_col()),
        's' => screen.save_cursor(),
        'u' => screen.restore_cursor(),
        _ => return false,
    }
    true
}

pub fn handle_esc(screen: &mut Screen, byte: u8) -> bool {
    match byte {
        b'7' => screen.save_cursor(),
        b'8' => screen.restore_cursor(),
        _ => return false,
    }
    true
}
