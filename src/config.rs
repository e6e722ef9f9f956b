//! Configuration loading.
//!
//! Settings come from, in increasing precedence: built-in defaults, the TOML
//! file at `<config dir>/termreplay/config.toml` (or `--config`),
//! `TERMREPLAY_*` environment variables, and finally command-line flags,
//! which are applied by the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::{ReplayOptions, SessionOptions};
use crate::render::Palette;
use crate::terminal::Color;

/// Environment variable overriding `playback.speed`.
pub const ENV_SPEED: &str = "TERMREPLAY_SPEED";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "TERMREPLAY_LOG_LEVEL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Speed multiplier
    pub speed: f64,
    /// Longest pause between events, in seconds
    pub idle_time_limit: Option<f64>,
    /// Keep the final frame until a key is pressed
    pub hold: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            idle_time_limit: None,
            hold: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub show_fps: bool,
    pub show_cursor: bool,
    /// Color specs: `default`, a palette name, or `rrggbb`
    pub foreground: String,
    pub background: String,
    pub cursor_color: String,
    /// Frames per second
    pub frame_rate: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_fps: true,
            show_cursor: true,
            foreground: "default".to_string(),
            background: "default".to_string(),
            cursor_color: "default".to_string(),
            frame_rate: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Log file; defaults to `<state dir>/termreplay/termreplay.log`
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("termreplay").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist. The default file is optional; when it
    /// is missing, defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply `TERMREPLAY_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SPEED) {
            self.playback.speed = value
                .trim()
                .parse()
                .ok()
                .filter(|speed: &f64| *speed > 0.0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_SPEED,
                    value,
                })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Resolve colors and timing into options for a playback session.
    pub fn session_options(&self) -> Result<SessionOptions, ConfigError> {
        let render = &self.render;
        let speed = self.playback.speed;
        if speed.is_nan() || speed <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "playback.speed",
                value: speed.to_string(),
            });
        }
        Ok(SessionOptions {
            replay: ReplayOptions {
                speed,
                idle_time_limit: self.playback.idle_time_limit,
            },
            hold: self.playback.hold,
            show_fps: render.show_fps,
            show_cursor: render.show_cursor,
            frame_rate: render.frame_rate.max(1),
            palette: Palette::from_colors(
                color("render.foreground", &render.foreground)?,
                color("render.background", &render.background)?,
                color("render.cursor_color", &render.cursor_color)?,
            ),
        })
    }
}

fn color(key: &'static str, spec: &str) -> Result<Color, ConfigError> {
    Color::parse(spec).ok_or_else(|| ConfigError::InvalidValue {
        key,
        value: spec.to_string(),
    })
}
