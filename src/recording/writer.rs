//! Frame encoder for session logs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{EventKind, LogEvent, RecordingError, TerminalSize};

/// Writes [`LogEvent`]s in the session log frame format.
///
/// Every frame is flushed as soon as it is written so a log cut short by a
/// crash still decodes up to the last complete frame.
pub struct LogWriter<W: Write> {
    writer: W,
    started: Instant,
    frames: u64,
}

impl LogWriter<BufWriter<File>> {
    /// Create (or truncate) a session log on disk.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| RecordingError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> LogWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            started: Instant::now(),
            frames: 0,
        }
    }

    /// Milliseconds elapsed since this writer was created.
    ///
    /// Used as the timestamp for events recorded live.
    pub fn now_ms(&self) -> i64 {
        self.started.elapsed().as_millis() as i64
    }

    /// Number of frames written.
    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    /// Encode one event and flush it.
    pub fn write_event(&mut self, event: &LogEvent) -> Result<(), RecordingError> {
        self.write_frame(event.kind, event.timestamp_ms, &event.payload)
    }

    /// Record a size change at the current time.
    pub fn record_size(&mut self, size: TerminalSize) -> Result<(), RecordingError> {
        let ts = self.now_ms();
        self.write_frame(EventKind::SizeChange, ts, &size.to_payload())
    }

    /// Record bytes typed into the session at the current time.
    pub fn record_stdin(&mut self, data: &[u8]) -> Result<(), RecordingError> {
        let ts = self.now_ms();
        self.write_frame(EventKind::Stdin, ts, data)
    }

    /// Record bytes produced by the session at the current time.
    pub fn record_stdout(&mut self, data: &[u8]) -> Result<(), RecordingError> {
        let ts = self.now_ms();
        self.write_frame(EventKind::Stdout, ts, data)
    }

    fn write_frame(
        &mut self,
        kind: EventKind,
        timestamp_ms: i64,
        payload: &[u8],
    ) -> Result<(), RecordingError> {
        let len =
            i64::try_from(payload.len()).map_err(|_| RecordingError::PayloadTooLarge(payload.len()))?;

        self.writer.write_u8(kind.to_code())?;
        self.writer.write_i64::<LittleEndian>(timestamp_ms)?;
        self.writer.write_i64::<LittleEndian>(len)?;
        self.writer.write_all(payload)?;
        self.writer.flush()?;
        self.frames += 1;
        Ok(())
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
