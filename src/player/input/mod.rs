//! Input handling for the player.
//!
//! Dispatches host terminal events and returns control flow signals.

mod keyboard;

pub use keyboard::{handle_key_event, key_to_bytes};

use std::time::Instant;

use crossterm::event::Event;
use tracing::debug;

use crate::player::state::{InputResult, PlaybackState};
use crate::terminal::TerminalProvider;

/// Handle any input event, dispatching to the appropriate handler.
///
/// A host resize only needs a redraw: the recorded grid keeps its own size
/// and is clipped to the host window. Everything else is ignored.
pub fn handle_event<M: TerminalProvider>(
    event: Event,
    state: &mut PlaybackState,
    model: &mut M,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, state, model),
        Event::Resize(cols, rows) => {
            debug!(cols, rows, "Host terminal resized");
            state.next_frame = Instant::now();
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}
