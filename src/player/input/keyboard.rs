//! Keyboard input handling for the player.
//!
//! Playback controls are handled here. When the terminal model accepts
//! input, keys are translated to xterm byte sequences and forwarded instead.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::player::state::{InputResult, PlaybackState};
use crate::terminal::TerminalProvider;

/// Handle a keyboard event.
///
/// Read-only models: `q`, `Esc` and `Ctrl-C` quit, `f` toggles the FPS
/// overlay. Interactive models receive every key; `Ctrl-]` quits. Once
/// playback has finished and the final frame is held, any key quits.
pub fn handle_key_event<M: TerminalProvider>(
    key: KeyEvent,
    state: &mut PlaybackState,
    model: &mut M,
) -> InputResult {
    if key.kind != KeyEventKind::Press {
        return InputResult::Continue;
    }
    if state.finished {
        return InputResult::Quit;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if model.capabilities().interactive {
        if ctrl && key.code == KeyCode::Char(']') {
            return InputResult::Quit;
        }
        if let Some(bytes) = key_to_bytes(&key) {
            if let Err(e) = model.send_input(&bytes) {
                warn!(error = %e, "Failed to forward key");
            }
        }
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if ctrl => InputResult::Quit,
        KeyCode::Char('f') => {
            state.toggle_fps();
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}

/// Translate a key into the bytes an xterm would send for it.
///
/// Returns `None` for keys with no sequence (modifier-only keys, media
/// keys and so on).
pub fn key_to_bytes(key: &KeyEvent) -> Option<Vec<u8>> {
    let seq: &[u8] = match key.code {
        KeyCode::Esc => b"\x1b",
        KeyCode::F(n) => function_key(n)?,
        KeyCode::Tab => b"\t",
        KeyCode::BackTab => b"\x1b[Z",
        KeyCode::Enter => b"\r",
        KeyCode::Backspace => b"\x7f",
        KeyCode::Delete => b"\x1b[3~",
        KeyCode::Insert => b"\x1b[2~",
        KeyCode::Up => b"\x1b[A",
        KeyCode::Down => b"\x1b[B",
        KeyCode::Right => b"\x1b[C",
        KeyCode::Left => b"\x1b[D",
        KeyCode::Home => b"\x1b[H",
        KeyCode::End => b"\x1b[F",
        KeyCode::PageUp => b"\x1b[5~",
        KeyCode::PageDown => b"\x1b[6~",
        KeyCode::Char(c) => return Some(char_bytes(c, key.modifiers)),
        _ => return None,
    };
    Some(seq.to_vec())
}

fn function_key(n: u8) -> Option<&'static [u8]> {
    Some(match n {
        1 => b"\x1bOP",
        2 => b"\x1bOQ",
        3 => b"\x1bOR",
        4 => b"\x1bOS",
        5 => b"\x1b[15~",
        6 => b"\x1b[17~",
        7 => b"\x1b[18~",
        8 => b"\x1b[19~",
        9 => b"\x1b[20~",
        10 => b"\x1b[21~",
        11 => b"\x1b[23~",
        12 => b"\x1b[24~",
        _ => return None,
    })
}

fn char_bytes(c: char, modifiers: KeyModifiers) -> Vec<u8> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        // Ctrl-@ through Ctrl-_ map onto the C0 range
        let upper = c.to_ascii_uppercase();
        if ('@'..='_').contains(&upper) {
            return vec![upper as u8 - b'@'];
        }
    }

    let mut buf = [0u8; 4];
    let mut bytes = c.encode_utf8(&mut buf).as_bytes().to_vec();
    if modifiers.contains(KeyModifiers::ALT) {
        bytes.insert(0, 0x1b);
    }
    bytes
}
