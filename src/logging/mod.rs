//! Tracing subscriber initialization.
//!
//! stdout belongs to the screen output, so logs go to a file. Watch it with `tail -f` in
//! another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Log path has no usable file name
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log path into the directory and file name the appender wants.
///
/// A bare file name logs into the current directory.
fn split_log_path(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    Ok((directory, file_name))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. "info", "vaxview=debug") is used.
/// Creates the log directory if it doesn't exist.
///
/// # Errors
///
/// Returns `LoggingError` if the path is unusable, the directory cannot be created, or a
/// global subscriber is already installed.
pub fn init(log_path: &Path, default_level: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
