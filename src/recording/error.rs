//! Recording errors.

use std::path::PathBuf;

use super::EventKind;

/// Errors that can occur while reading or writing a session log.
///
/// Running out of bytes is not represented here: a short read ends the
/// stream (see [`super::EndOfStream`]).
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("Malformed {kind:?} payload: expected {expected} bytes, got {actual}")]
    MalformedPayload {
        kind: EventKind,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to open recording {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Payload of {0} bytes does not fit in a frame")]
    PayloadTooLarge(usize),

    #[error("Recording I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
