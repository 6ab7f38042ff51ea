//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "VAXVIEW_CONFIG";
/// Environment variable overriding the catalog path.
pub const ENV_CATALOG: &str = "VAXVIEW_CATALOG";
/// Environment variable overriding the page size.
pub const ENV_PAGE_SIZE: &str = "VAXVIEW_PAGE_SIZE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting has an unusable value.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/vaxview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// JSONL catalog of vaccination records.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Records served per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: Option<String>,

    /// How often the driver polls for deliveries while waiting.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// How long the driver waits for the screen to settle after a command.
    #[serde(default)]
    pub settle_timeout_ms: Option<u64>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// JSONL catalog served by the repository.
    pub catalog_path: PathBuf,
    /// Records per page. Never zero after [`validate`].
    pub page_size: usize,
    /// Tracing output file.
    pub log_file_path: PathBuf,
    /// Filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Driver poll interval while waiting for deliveries.
    pub poll_interval_ms: u64,
    /// Upper bound on the wait after each command.
    pub settle_timeout_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("vaccinations.jsonl"),
            page_size: 10,
            log_file_path: default_log_path(),
            log_level: "info".to_string(),
            poll_interval_ms: 10,
            settle_timeout_ms: 5_000,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/vaxview/vaxview.log` on Linux, the platform equivalent elsewhere,
/// or `vaxview.log` in the current directory if no state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("vaxview").join("vaxview.log")
    } else {
        PathBuf::from("vaxview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/vaxview/config.toml` on Linux, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vaxview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `VAXVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/vaxview/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        catalog_path: config.catalog_path.unwrap_or(defaults.catalog_path),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        log_level: config.log_level.unwrap_or(defaults.log_level),
        poll_interval_ms: config.poll_interval_ms.unwrap_or(defaults.poll_interval_ms),
        settle_timeout_ms: config
            .settle_timeout_ms
            .unwrap_or(defaults.settle_timeout_ms),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `VAXVIEW_CATALOG` and `VAXVIEW_PAGE_SIZE`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `VAXVIEW_PAGE_SIZE` is not a number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(catalog) = std::env::var(ENV_CATALOG) {
        config.catalog_path = PathBuf::from(catalog);
    }

    if let Ok(raw) = std::env::var(ENV_PAGE_SIZE) {
        config.page_size = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
            key: ENV_PAGE_SIZE,
            reason: format!("{:?}: {}", raw, e),
        })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually passed are applied.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    catalog_override: Option<PathBuf>,
    page_size_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(catalog) = catalog_override {
        config.catalog_path = catalog;
    }

    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    config
}

/// Reject settings no source could have meant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a zero page size or poll interval.
pub fn validate(config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if config.page_size == 0 {
        return Err(ConfigError::InvalidValue {
            key: "page_size",
            reason: "must be at least 1".to_string(),
        });
    }

    if config.poll_interval_ms == 0 {
        return Err(ConfigError::InvalidValue {
            key: "poll_interval_ms",
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
