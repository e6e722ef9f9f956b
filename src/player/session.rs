//! Session loop.
//!
//! Owns the host terminal for the length of a playback and interleaves
//! scheduler ticks, frame rendering and keyboard input on one thread.

use std::io::{self, Read, Stdout};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::player::input::handle_event;
use crate::player::playback::{PlaybackStats, ReplayOptions, ReplayScheduler, Tick};
use crate::player::state::{InputResult, PlaybackState};
use crate::recording::{EndOfStream, LogReader};
use crate::render::{CellSurface, FpsCounter, FrameRenderer, Palette};
use crate::terminal::{ReplayTerminal, TerminalProvider};

/// Everything a playback session can be configured with.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub replay: ReplayOptions,
    /// Keep the final frame up until a key is pressed
    pub hold: bool,
    pub show_fps: bool,
    pub show_cursor: bool,
    /// Frames drawn per second
    pub frame_rate: u32,
    pub palette: Palette,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            replay: ReplayOptions::default(),
            hold: false,
            show_fps: true,
            show_cursor: true,
            frame_rate: 30,
            palette: Palette::default(),
        }
    }
}

/// How a playback session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The log was played to the end
    Finished(PlaybackStats),
    /// The user quit before the end
    Interrupted(PlaybackStats),
}

impl PlaybackResult {
    pub fn stats(&self) -> &PlaybackStats {
        match self {
            PlaybackResult::Finished(stats) | PlaybackResult::Interrupted(stats) => stats,
        }
    }
}

/// Play a session log on the host terminal.
///
/// The log is opened before the terminal is touched, so an unreadable file
/// fails without disturbing the screen.
pub fn play_session(path: &Path, options: &SessionOptions) -> Result<PlaybackResult> {
    let reader = LogReader::open(path)
        .with_context(|| format!("Failed to open session log {}", path.display()))?;
    info!(path = %path.display(), "Opened session log");

    let mut host = HostTerminal::enter().context("Failed to set up terminal")?;
    let result = run_loop(&mut host, reader, options);
    host.leave().context("Failed to restore terminal")?;
    result
}

fn run_loop<R: Read>(
    host: &mut HostTerminal,
    reader: LogReader<R>,
    options: &SessionOptions,
) -> Result<PlaybackResult> {
    let mut model = ReplayTerminal::new();
    let mut scheduler = ReplayScheduler::new(reader, options.replay);
    let mut renderer = FrameRenderer::new(options.palette, options.show_cursor);
    let mut fps = FpsCounter::new(Instant::now());
    let mut state = PlaybackState::new(
        Instant::now(),
        options.frame_rate,
        options.show_fps,
        options.hold,
    );
    let overlay = options.palette.overlay;

    loop {
        let now = Instant::now();

        // One tick per iteration keeps frames coming while catching up
        if state.tick_due(now) {
            match scheduler.tick(&mut model) {
                Tick::Wait(wait) => state.schedule_tick(now, wait),
                Tick::Finished => {
                    state.finish();
                    // Show the final state at once
                    state.next_frame = now;
                }
            }
        }

        if state.frame_due(now) {
            let show_fps = state.show_fps;
            host.terminal
                .draw(|frame| {
                    let area = frame.area();
                    let mut surface = CellSurface::new(frame.buffer_mut(), area);
                    renderer.render(&model.grid(), &mut surface);
                    if show_fps {
                        fps.draw(&mut surface, overlay);
                    }
                })
                .context("Failed to draw frame")?;
            fps.tick(now);
            state.frame_done(now);
        }

        if state.should_exit() {
            return Ok(PlaybackResult::Finished(scheduler.stats()));
        }

        let timeout = state.poll_timeout(Instant::now());
        if event::poll(timeout).context("Failed to poll terminal events")? {
            let event = event::read().context("Failed to read terminal event")?;
            if handle_event(event, &mut state, &mut model) == InputResult::Quit {
                if state.finished {
                    return Ok(PlaybackResult::Finished(scheduler.stats()));
                }
                scheduler.finish();
                info!("Playback interrupted");
                return Ok(PlaybackResult::Interrupted(scheduler.stats()));
            }
        }
    }
}

/// The final screen of a log, replayed without timing.
#[derive(Debug, Clone)]
pub struct FinalScreen {
    /// Screen text, one line per row with trailing blanks removed
    pub text: String,
    pub columns: usize,
    pub rows: usize,
    pub stats: PlaybackStats,
    /// Why decoding stopped
    pub end: Option<EndOfStream>,
}

/// Replay a log as fast as possible and return the final screen.
///
/// Waits computed by the scheduler are ignored; speed and idle limit still
/// apply to the logical clock.
pub fn dump_final_screen(path: &Path, options: &ReplayOptions) -> Result<FinalScreen> {
    let reader = LogReader::open(path)
        .with_context(|| format!("Failed to open session log {}", path.display()))?;
    Ok(replay_to_end(reader, options))
}

pub(crate) fn replay_to_end<R: Read>(reader: LogReader<R>, options: &ReplayOptions) -> FinalScreen {
    let mut model = ReplayTerminal::new();
    let mut scheduler = ReplayScheduler::new(reader, *options);
    while let Tick::Wait(_) = scheduler.tick(&mut model) {}
    model.close();

    let (columns, rows) = model.size();
    FinalScreen {
        text: model.buffer().to_string(),
        columns,
        rows,
        stats: scheduler.stats(),
        end: scheduler.end_of_stream().cloned(),
    }
}

/// Host terminal in raw mode on the alternate screen.
///
/// Dropping it restores the terminal, so an error or panic inside the loop
/// does not leave the shell in raw mode.
struct HostTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl HostTerminal {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = stdout.execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Drop for HostTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}
