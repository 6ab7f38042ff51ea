//! Error types for vaxview.
//!
//! This module defines a hierarchical error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all fatal failures
//!   - [`CatalogError`] - Catalog file reading and parsing failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file loading failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failures
//!   - `std::io::Error` - Terminal (stdin/stdout) failures
//!
//! # Error Recovery Strategy
//!
//! Catalog errors raised while serving a fetch are **non-fatal**: the repository turns them
//! into `Resource::Error` emissions, so the screen shows the message and stays retryable.
//! Only failures during startup or terminal I/O reach [`AppError`] and end the process.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// Returned from the binary's run loop. Domain-specific errors convert via `From`.
///
/// # Examples
///
/// ```no_run
/// use vaxview::model::error::{AppError, CatalogError};
///
/// fn run_app() -> Result<(), AppError> {
///     // CatalogError automatically converts to AppError via From
///     let _catalog = read_catalog()?;
///     Ok(())
/// }
/// # fn read_catalog() -> Result<(), CatalogError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The catalog file is unusable at startup.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Reading commands or writing output failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading the vaccination catalog.
///
/// Each variant carries enough context (path, line number) to be shown verbatim as the
/// error message of a failed fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("Catalog not found: {path:?}")]
    NotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// The catalog file exists but could not be read.
    #[error("Failed to read catalog {path:?}: {reason}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error, rendered.
        reason: String,
    },

    /// A catalog line is not a valid vaccination record.
    #[error("Invalid catalog record at line {line}: {reason}")]
    Parse {
        /// 1-based line number of the malformed record.
        line: usize,
        /// Deserialization error details.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_includes_line_number() {
        let err = CatalogError::Parse {
            line: 7,
            reason: "missing field `name`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid catalog record at line 7: missing field `name`"
        );
    }

    #[test]
    fn catalog_error_converts_into_app_error() {
        fn fail() -> Result<(), AppError> {
            Err(CatalogError::NotFound {
                path: PathBuf::from("/missing.jsonl"),
            })?;
            Ok(())
        }

        let err = fail().unwrap_err();
        assert!(
            matches!(err, AppError::Catalog(CatalogError::NotFound { .. })),
            "Expected catalog variant, got {:?}",
            err
        );
        assert!(err.to_string().starts_with("Catalog error: Catalog not found"));
    }

    #[test]
    fn io_error_converts_into_terminal_variant() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Terminal(_)));
    }
}
