//! Terminal escape sequence handlers.
//!
//! Organized by category:
//! - cursor: Cursor movement and positioning
//! - scroll: Scroll region and scrolling operations
//! - editing: Erase, insert and delete operations
//! - style: SGR (Select Graphic Rendition) handling
//!
//! Each `handle_csi` returns `false` when the final byte is not one it
//! knows, so the performer can log the sequence as unhandled.

pub mod cursor;
pub mod editing;
pub mod scroll;
pub mod style;

use tracing::trace;
use vte::Params;

/// First value of every parameter group, in order.
///
/// Sub-parameters (colon separated) are only meaningful to SGR, which reads
/// the raw groups itself.
pub(crate) fn flatten(params: &Params) -> Vec<u16> {
    params
        .iter()
        .map(|group| group.first().copied().unwrap_or(0))
        .collect()
}

/// Parameter `index` as a count: missing or zero means `default`.
pub(crate) fn count(params: &[u16], index: usize, default: usize) -> usize {
    match params.get(index) {
        Some(&0) | None => default,
        Some(&n) => n as usize,
    }
}

/// Parameter `index` as a mode selector: missing means 0.
pub(crate) fn mode(params: &[u16], index: usize) -> u16 {
    params.get(index).copied().unwrap_or(0)
}

pub(crate) fn log_unhandled_csi(params: &[u16], intermediates: &[u8], action: char) {
    trace!(
        ?params,
        intermediates = %String::from_utf8_lossy(intermediates),
        action = %action,
        "Unhandled CSI sequence"
    );
}

pub(crate) fn log_unhandled_esc(intermediates: &[u8], byte: u8) {
    trace!(
        intermediates = %String::from_utf8_lossy(intermediates),
        byte = %(byte as char),
        "Unhandled ESC sequence"
    );
}
