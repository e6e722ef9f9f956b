//! Binary terminal session log format.
//!
//! A recording is a flat sequence of little-endian frames:
//!
//! | field        | width            | meaning                                  |
//! |--------------|------------------|------------------------------------------|
//! | data_type    | 1 byte           | 0 = size change, 1 = stdin, 2 = stdout   |
//! | timestamp_ms | 8 bytes, signed  | milliseconds on the recorder's clock     |
//! | length       | 8 bytes, signed  | payload byte count                       |
//! | payload      | `length` bytes   | size change: u16 rows, u16 cols; else raw |
//!
//! There is no file header and no checksum. A log cut off in the middle of a
//! frame is read as if it ended after the last complete frame.

mod error;
mod reader;
mod writer;

use std::borrow::Cow;
use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

pub use error::RecordingError;
pub use reader::{EndOfStream, LogReader};
pub use writer::LogWriter;

/// Frame tag for a terminal size change.
pub const DATA_TYPE_SIZE_CHANGE: u8 = 0;
/// Frame tag for bytes typed into the recorded session.
pub const DATA_TYPE_STDIN: u8 = 1;
/// Frame tag for bytes written by the recorded session.
pub const DATA_TYPE_STDOUT: u8 = 2;

/// Size of the fixed frame header (tag + timestamp + length).
pub const FRAME_HEADER_LEN: usize = 1 + 8 + 8;

/// Size of a well-formed size change payload.
pub const SIZE_CHANGE_PAYLOAD_LEN: usize = 4;

/// Event kind codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Terminal was resized
    SizeChange,
    /// Input (data typed by the user)
    Stdin,
    /// Output (data written to the terminal)
    Stdout,
}

impl EventKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            DATA_TYPE_SIZE_CHANGE => Some(EventKind::SizeChange),
            DATA_TYPE_STDIN => Some(EventKind::Stdin),
            DATA_TYPE_STDOUT => Some(EventKind::Stdout),
            _ => None,
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            EventKind::SizeChange => DATA_TYPE_SIZE_CHANGE,
            EventKind::Stdin => DATA_TYPE_STDIN,
            EventKind::Stdout => DATA_TYPE_STDOUT,
        }
    }
}

/// Terminal dimensions carried by a size change frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub rows: u16,
    pub cols: u16,
}

impl TerminalSize {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Encode as the 4-byte size change payload (rows first).
    pub fn to_payload(self) -> [u8; SIZE_CHANGE_PAYLOAD_LEN] {
        let rows = self.rows.to_le_bytes();
        let cols = self.cols.to_le_bytes();
        [rows[0], rows[1], cols[0], cols[1]]
    }
}

impl std::fmt::Display for TerminalSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// A single decoded frame of the recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub kind: EventKind,
    /// Recorder clock at the time the frame was written (milliseconds)
    pub timestamp_ms: i64,
    pub payload: Vec<u8>,
}

impl LogEvent {
    pub fn new(kind: EventKind, timestamp_ms: i64, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            timestamp_ms,
            payload: payload.into(),
        }
    }

    pub fn size_change(timestamp_ms: i64, size: TerminalSize) -> Self {
        Self::new(EventKind::SizeChange, timestamp_ms, size.to_payload())
    }

    pub fn stdin(timestamp_ms: i64, data: impl Into<Vec<u8>>) -> Self {
        Self::new(EventKind::Stdin, timestamp_ms, data)
    }

    pub fn stdout(timestamp_ms: i64, data: impl Into<Vec<u8>>) -> Self {
        Self::new(EventKind::Stdout, timestamp_ms, data)
    }

    /// Parse the payload of a size change frame.
    ///
    /// # Returns
    /// The recorded size, or `MalformedPayload` if this is not a size change
    /// frame or the payload is not exactly four bytes.
    pub fn parse_size(&self) -> Result<TerminalSize, RecordingError> {
        if self.kind != EventKind::SizeChange || self.payload.len() != SIZE_CHANGE_PAYLOAD_LEN {
            return Err(RecordingError::MalformedPayload {
                kind: self.kind,
                expected: SIZE_CHANGE_PAYLOAD_LEN,
                actual: self.payload.len(),
            });
        }

        let mut cursor = Cursor::new(&self.payload);
        let rows = cursor.read_u16::<LittleEndian>()?;
        let cols = cursor.read_u16::<LittleEndian>()?;
        Ok(TerminalSize { rows, cols })
    }

    /// Payload decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Size of this event once framed.
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_LEN + self.payload.len()
    }
}
