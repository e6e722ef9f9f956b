//! Frames-per-second overlay.

use std::time::{Duration, Instant};

use super::label::Label;
use super::palette::Rgb;
use super::surface::Surface;

const WINDOW: Duration = Duration::from_secs(1);

/// Counts frames and publishes the total once per second.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    current: u32,
    label: Label,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            current: 0,
            label: Label::default(),
        }
    }

    /// Count a frame drawn at `now` and return the published rate.
    ///
    /// The rate is the number of frames in the last completed window; it
    /// reads 0 until the first window closes.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.frames += 1;
        if now.saturating_duration_since(self.window_start) > WINDOW {
            self.window_start = now;
            self.current = self.frames;
            self.frames = 0;
        }
        self.current
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Draw `FPS: n` right-aligned on the first row.
    pub fn draw<S: Surface>(&mut self, surface: &mut S, color: Rgb) {
        let text = format!("FPS: {}", self.current);
        self.label
            .update(&text, color, false, false, |t| surface.measure(t));
        let x = (surface.width() - self.label.content_width()).max(0.0);
        surface.draw_label(&self.label, x, 0);
    }
}
