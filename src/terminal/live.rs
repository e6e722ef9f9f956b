//! Live terminal backend.
//!
//! Wraps a running process: its output is parsed into a [`TerminalBuffer`]
//! and input is written back to it. The process either runs under a pty or
//! the caller supplies both halves of the I/O directly.
//!
//! Output is read on a dedicated thread and handed over through a channel;
//! `update()` drains it on the caller's thread, so the grid is only ever
//! touched from one place.

use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use portable_pty::{native_pty_system, Child, ChildKiller, CommandBuilder, MasterPty, PtySize};
use tracing::{debug, info, warn};

use super::buffer::TerminalBuffer;
use super::error::TerminalError;
use super::provider::{Capabilities, TerminalProvider};
use super::types::TerminalGrid;
use crate::recording::{LogWriter, TerminalSize};

const READ_CHUNK: usize = 8192;

type Recorder = LogWriter<Box<dyn Write + Send>>;

struct PtyProcess {
    master: Box<dyn MasterPty + Send>,
    child: Box<dyn Child + Send + Sync>,
}

/// Interactive terminal attached to a real process.
pub struct LiveTerminal {
    buffer: TerminalBuffer,
    output: Receiver<Vec<u8>>,
    input: Box<dyn Write + Send>,
    pty: Option<PtyProcess>,
    recorder: Option<Recorder>,
    open: bool,
}

impl LiveTerminal {
    /// Spawn `program` under a new pty of the given size.
    pub fn spawn(
        program: &str,
        args: &[String],
        columns: usize,
        rows: usize,
    ) -> Result<Self, TerminalError> {
        let pair = native_pty_system()
            .openpty(pty_size(columns, rows))
            .map_err(|e| TerminalError::Pty(format!("open pty: {e}")))?;

        let mut cmd = CommandBuilder::new(program);
        cmd.args(args);
        if let Ok(cwd) = std::env::current_dir() {
            cmd.cwd(cwd);
        }
        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| TerminalError::Pty(format!("spawn {program}: {e}")))?;
        // The child holds its own copy; keeping ours open would hide EOF
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| TerminalError::Pty(format!("clone pty reader: {e}")))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| TerminalError::Pty(format!("take pty writer: {e}")))?;

        let (tx, rx) = mpsc::channel();
        spawn_reader(reader, tx)?;
        info!(program, columns, rows, "Spawned live session");

        let mut terminal = Self::from_io(columns, rows, rx, writer);
        terminal.pty = Some(PtyProcess {
            master: pair.master,
            child,
        });
        Ok(terminal)
    }

    /// Build a terminal from caller-supplied output and input halves.
    ///
    /// The session counts as open until every sender of `output` is dropped.
    pub fn from_io(
        columns: usize,
        rows: usize,
        output: Receiver<Vec<u8>>,
        input: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            buffer: TerminalBuffer::new(columns, rows),
            output,
            input,
            pty: None,
            recorder: None,
            open: true,
        }
    }

    /// A terminal with no process behind it. Output is pushed through the
    /// returned sender; input is discarded.
    pub fn detached(columns: usize, rows: usize) -> (Self, Sender<Vec<u8>>) {
        let (tx, rx) = mpsc::channel();
        (Self::from_io(columns, rows, rx, Box::new(io::sink())), tx)
    }

    /// Tee all traffic into a session log written to `writer`.
    ///
    /// The current size is recorded first so the log replays at the right
    /// dimensions.
    pub fn record_to<W: Write + Send + 'static>(mut self, writer: W) -> Result<Self, TerminalError> {
        let mut recorder: Recorder = LogWriter::new(Box::new(writer));
        recorder.record_size(self.terminal_size())?;
        self.recorder = Some(recorder);
        Ok(self)
    }

    /// Stop recording and return the log writer.
    pub fn take_recorder(&mut self) -> Option<LogWriter<Box<dyn Write + Send>>> {
        self.recorder.take()
    }

    fn terminal_size(&self) -> TerminalSize {
        let clamp = |v: usize| u16::try_from(v).unwrap_or(u16::MAX);
        TerminalSize::new(clamp(self.buffer.height()), clamp(self.buffer.width()))
    }

    fn apply_output(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        self.buffer.process(bytes);
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record_stdout(bytes)?;
        }
        Ok(())
    }

    fn child_exited(&mut self) -> bool {
        match self.pty.as_mut() {
            Some(pty) => matches!(pty.child.try_wait(), Ok(Some(_))),
            None => false,
        }
    }
}

fn pty_size(columns: usize, rows: usize) -> PtySize {
    PtySize {
        rows: u16::try_from(rows.max(1)).unwrap_or(u16::MAX),
        cols: u16::try_from(columns.max(1)).unwrap_or(u16::MAX),
        pixel_width: 0,
        pixel_height: 0,
    }
}

fn spawn_reader(mut reader: Box<dyn Read + Send>, tx: Sender<Vec<u8>>) -> Result<(), TerminalError> {
    thread::Builder::new()
        .name("pty-reader".to_string())
        .spawn(move || {
            let mut buf = [0u8; READ_CHUNK];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        debug!(error = %e, "pty reader stopped");
                        break;
                    }
                }
            }
        })?;
    Ok(())
}

impl TerminalProvider for LiveTerminal {
    fn backend_name(&self) -> &'static str {
        "live"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            interactive: true,
            cursor_control: true,
            recording: self.recorder.is_some(),
        }
    }

    fn grid(&self) -> TerminalGrid<'_> {
        self.buffer.grid()
    }

    fn size(&self) -> (usize, usize) {
        (self.buffer.width(), self.buffer.height())
    }

    fn cursor(&self) -> (usize, usize) {
        (self.buffer.cursor_col(), self.buffer.cursor_row())
    }

    fn feed_output(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        self.apply_output(bytes)
    }

    fn send_input(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        if !self.open {
            return Err(TerminalError::Closed);
        }
        self.input.write_all(bytes)?;
        self.input.flush()?;
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record_stdin(bytes)?;
        }
        Ok(())
    }

    fn resize(&mut self, rows: usize, cols: usize) -> Result<(), TerminalError> {
        self.buffer.resize(cols, rows);
        if let Some(pty) = self.pty.as_ref() {
            pty.master
                .resize(pty_size(cols, rows))
                .map_err(|e| TerminalError::Pty(format!("resize pty: {e}")))?;
        }
        let size = self.terminal_size();
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record_size(size)?;
        }
        Ok(())
    }

    fn set_cursor(&mut self, x: usize, y: usize) -> Result<(), TerminalError> {
        let (columns, rows) = self.size();
        if x >= columns || y >= rows {
            return Err(TerminalError::CursorOutOfBounds {
                x,
                y,
                columns,
                rows,
            });
        }
        self.buffer.set_cursor(x, y);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn update(&mut self) -> Result<bool, TerminalError> {
        let mut changed = false;
        loop {
            match self.output.try_recv() {
                Ok(chunk) => {
                    self.apply_output(&chunk)?;
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.open {
                        debug!("Live session output closed");
                    }
                    self.open = false;
                    break;
                }
            }
        }
        if self.open && self.child_exited() {
            // Output may still be buffered in the channel; the next update
            // drains it and then sees the disconnect.
            debug!("Live session process exited");
        }
        Ok(changed)
    }
}

impl Drop for LiveTerminal {
    fn drop(&mut self) {
        if let Some(pty) = self.pty.as_mut() {
            if matches!(pty.child.try_wait(), Ok(None)) {
                if let Err(e) = pty.child.kill() {
                    warn!(error = %e, "Failed to stop live session process");
                }
            }
        }
    }
}
