//! Terminal backend errors.

/// Errors returned by [`super::TerminalProvider`] operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// The backend does not support this mutation (e.g. moving the cursor
    /// of a replayed session)
    #[error("{operation} is not supported by the {backend} backend")]
    UnsupportedOperation {
        backend: &'static str,
        operation: &'static str,
    },

    #[error("Cursor position ({x}, {y}) is outside the {columns}x{rows} grid")]
    CursorOutOfBounds {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },

    #[error("Terminal session has closed")]
    Closed,

    #[error("PTY error: {0}")]
    Pty(String),

    #[error("Recording tee failed: {0}")]
    Recording(#[from] crate::recording::RecordingError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
