//! Frame decoder for session logs.
//!
//! Reads one frame per call. Anything that prevents a complete frame from
//! being assembled ends the stream; the reason is kept for diagnostics.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use tracing::{debug, warn};

use super::{EventKind, LogEvent, RecordingError};

/// Why the reader stopped producing events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndOfStream {
    /// Input ended exactly on a frame boundary
    Clean,
    /// Input ended inside the fixed-width header
    TruncatedHeader,
    /// Header was complete but the payload was cut short
    TruncatedPayload { declared: u64, available: u64 },
    /// Header declared a negative payload length
    InvalidLength(i64),
    /// The underlying reader failed
    ReadError(String),
}

impl EndOfStream {
    /// True if the log ended on a frame boundary.
    pub fn is_clean(&self) -> bool {
        matches!(self, EndOfStream::Clean)
    }
}

/// Decodes [`LogEvent`]s from a byte stream.
///
/// The reader holds no state besides its position in the stream, so
/// `read_next` can be called once per scheduler tick.
pub struct LogReader<R> {
    reader: R,
    position: u64,
    frames: u64,
    end: Option<EndOfStream>,
}

impl LogReader<BufReader<File>> {
    /// Open a session log on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RecordingError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> LogReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
            frames: 0,
            end: None,
        }
    }

    /// Bytes consumed from the underlying reader so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of complete frames decoded, including skipped ones.
    pub fn frames_read(&self) -> u64 {
        self.frames
    }

    /// Reason decoding stopped, once it has.
    pub fn end_of_stream(&self) -> Option<&EndOfStream> {
        self.end.as_ref()
    }

    /// Decode the next event.
    ///
    /// Frames with an unknown tag are skipped. Returns `None` at the end of
    /// the log, including when the final frame is truncated; every later
    /// call also returns `None`.
    pub fn read_next(&mut self) -> Option<LogEvent> {
        if self.end.is_some() {
            return None;
        }

        loop {
            match self.read_frame() {
                Ok(Frame::Event(event)) => return Some(event),
                Ok(Frame::Unknown { code, len }) => {
                    warn!(code, len, offset = self.position, "Skipping frame with unknown type");
                }
                Err(end) => {
                    debug!(reason = ?end, offset = self.position, frames = self.frames, "End of log");
                    self.end = Some(end);
                    return None;
                }
            }
        }
    }

    fn read_frame(&mut self) -> Result<Frame, EndOfStream> {
        let mut tag = [0u8; 1];
        match self.reader.read(&mut tag) {
            Ok(0) => return Err(EndOfStream::Clean),
            Ok(_) => self.position += 1,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return self.read_frame(),
            Err(e) => return Err(EndOfStream::ReadError(e.to_string())),
        }

        let timestamp_ms = self.read_header_field()?;
        let length = self.read_header_field()?;
        if length < 0 {
            return Err(EndOfStream::InvalidLength(length));
        }

        let declared = length as u64;
        let mut payload = Vec::new();
        let available = (&mut self.reader)
            .take(declared)
            .read_to_end(&mut payload)
            .map_err(|e| EndOfStream::ReadError(e.to_string()))? as u64;
        self.position += available;

        if available < declared {
            return Err(EndOfStream::TruncatedPayload {
                declared,
                available,
            });
        }

        self.frames += 1;
        Ok(match EventKind::from_code(tag[0]) {
            Some(kind) => Frame::Event(LogEvent::new(kind, timestamp_ms, payload)),
            None => Frame::Unknown {
                code: tag[0],
                len: declared,
            },
        })
    }

    fn read_header_field(&mut self) -> Result<i64, EndOfStream> {
        match self.reader.read_i64::<LittleEndian>() {
            Ok(value) => {
                self.position += 8;
                Ok(value)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(EndOfStream::TruncatedHeader),
            Err(e) => Err(EndOfStream::ReadError(e.to_string())),
        }
    }
}

impl<R: Read> Iterator for LogReader<R> {
    type Item = LogEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next()
    }
}

enum Frame {
    Event(LogEvent),
    Unknown { code: u8, len: u64 },
}
