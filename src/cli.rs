//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[cfg(not(feature = "release"))]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_GIT_SHA"),
    " (built ",
    env!("TERMREPLAY_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("TERMREPLAY_BUILD_DATE"),
    ")"
);

/// Replay a recorded terminal session
#[derive(Parser, Debug)]
#[command(name = "termreplay")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Replay a recorded terminal session log")]
pub struct Cli {
    /// Session log to play
    pub log: PathBuf,

    /// Playback speed multiplier
    #[arg(short, long, value_parser = positive_f64)]
    pub speed: Option<f64>,

    /// Cap every pause between events to this many seconds
    #[arg(short, long, value_name = "SECS", value_parser = non_negative_f64)]
    pub idle_time_limit: Option<f64>,

    /// Keep the final frame on screen until a key is pressed
    #[arg(long)]
    pub hold: bool,

    /// Print the final screen as text instead of playing
    #[arg(long)]
    pub dump: bool,

    /// Hide the FPS counter
    #[arg(long)]
    pub no_fps: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Apply flags on top of file and environment settings.
    ///
    /// Boolean flags only ever switch their feature on (or the FPS counter
    /// off); leaving a flag out keeps the configured value.
    pub fn apply(&self, config: &mut Config) {
        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }
        if let Some(limit) = self.idle_time_limit {
            config.playback.idle_time_limit = Some(limit);
        }
        if self.hold {
            config.playback.hold = true;
        }
        if self.no_fps {
            config.render.show_fps = false;
        }
    }
}

fn positive_f64(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(format!("expected a positive number, got {value:?}")),
    }
}

fn non_negative_f64(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => Ok(v),
        _ => Err(format!("expected a number >= 0, got {value:?}")),
    }
}
