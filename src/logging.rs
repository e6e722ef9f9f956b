//! Tracing subscriber setup.
//!
//! The host terminal is used for playback, so logs go to a file.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    #[error("Invalid log filter {directive:?}: {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// `<state dir>/termreplay/termreplay.log`, or the working directory when
/// the platform has no state directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(dir) => dir.join("termreplay").join("termreplay.log"),
        None => PathBuf::from("termreplay.log"),
    }
}

/// Build the filter: `RUST_LOG` when set, `default_directive` otherwise.
pub fn env_filter(default_directive: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_directive).map_err(|e| LoggingError::InvalidFilter {
        directive: default_directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install a file-backed fmt subscriber.
///
/// Creates the log directory if needed. Fails if a global subscriber is
/// already set.
pub fn init(log_path: &Path, default_directive: &str) -> Result<(), LoggingError> {
    let file_name = log_path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let filter = env_filter(default_directive)?;
    let appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
