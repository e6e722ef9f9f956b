//! vte `Perform` implementation.
//!
//! Routes parsed actions from the vte state machine to the screen
//! operations in [`super::handlers`].

use tracing::trace;
use vte::{Params, Perform};

use super::handlers::{self, cursor, editing, scroll, style};
use super::screen::Screen;

/// Borrowing adapter so the parser and the screen can live side by side.
pub(crate) struct TerminalPerformer<'a> {
    pub screen: &'a mut Screen,
}

impl Perform for TerminalPerformer<'_> {
    fn print(&mut self, c: char) {
        self.screen.print(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' | 0x0b | 0x0c => self.screen.line_feed(),
            b'\r' => self.screen.carriage_return(),
            0x08 => self.screen.backspace(),
            b'\t' => self.screen.tab(),
            // BEL, SO/SI and the rest have no visible effect
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            trace!(action = %action, "Dropping CSI with too many parameters");
            return;
        }

        if action == 'm' && intermediates.is_empty() {
            style::handle_sgr(self.screen, params);
            return;
        }

        let values = handlers::flatten(params);
        if intermediates == b"?" {
            self.dec_private_mode(&values, action);
            return;
        }
        if !intermediates.is_empty() {
            handlers::log_unhandled_csi(&values, intermediates, action);
            return;
        }

        let handled = cursor::handle_csi(self.screen, action, &values)
            || editing::handle_csi(self.screen, action, &values)
            || scroll::handle_csi(self.screen, action, &values);
        if !handled {
            handlers::log_unhandled_csi(&values, intermediates, action);
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        // Charset designations (ESC ( B and friends) carry intermediates
        if !intermediates.is_empty() {
            handlers::log_unhandled_esc(intermediates, byte);
            return;
        }

        if byte == b'c' {
            self.screen.reset();
            return;
        }
        let handled = cursor::handle_esc(self.screen, byte) || scroll::handle_esc(self.screen, byte);
        if !handled {
            handlers::log_unhandled_esc(intermediates, byte);
        }
    }
}

impl TerminalPerformer<'_> {
    /// DECSET/DECRST. Only autowrap changes how the grid is written; the
    /// alternate screen is folded into the main one before bytes get here.
    fn dec_private_mode(&mut self, values: &[u16], action: char) {
        let enable = match action {
            'h' => true,
            'l' => false,
            _ => {
                handlers::log_unhandled_csi(values, b"?", action);
                return;
            }
        };
        for &mode in values {
            match mode {
                7 => self.screen.auto_wrap = enable,
                _ => trace!(mode, enable, "Ignoring DEC private mode"),
            }
        }
    }
}
