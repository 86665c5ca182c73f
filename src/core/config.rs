//! Logger configuration
//!
//! Bound once when the logger is built and never changed afterwards.

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    output_format::OutputFormat,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default base path: files land in `logs/` as `logfile_<LEVEL>.log`
pub const DEFAULT_BASE_PATH: &str = "logs/logfile";

/// Default maximum file size (1 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Configuration for [`Logger`](crate::Logger)
///
/// Missing fields take their defaults when deserializing, so a partial
/// document is enough:
///
/// ```
/// use async_file_logger::{LoggerConfig, LogLevel, OutputFormat};
///
/// let config = LoggerConfig::from_json(r#"{"min_level": "WARNING", "output_format": "json"}"#).unwrap();
/// assert_eq!(config.min_level, LogLevel::Warning);
/// assert_eq!(config.output_format, OutputFormat::Json);
/// assert!(config.split_by_level);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Path prefix for log files; its parent is the output directory
    pub base_path: PathBuf,

    /// Entries below this level are discarded
    pub min_level: LogLevel,

    /// One file per level (`<base>_<LEVEL>.log`) instead of `<base>.log`
    pub split_by_level: bool,

    /// Plain text or single-line structured output
    pub output_format: OutputFormat,

    /// Maximum file size in bytes.
    ///
    /// Accepted and kept, but not enforced: files are never rotated.
    pub max_file_size: u64,

    /// Write every entry to the console as well
    pub console: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            min_level: LogLevel::Debug,
            split_by_level: true,
            output_format: OutputFormat::Text,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            console: true,
        }
    }
}

impl LoggerConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the configuration without touching the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.base_path.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "base_path is empty"));
        }
        let ends_in_separator = self
            .base_path
            .as_os_str()
            .to_string_lossy()
            .ends_with(std::path::is_separator);
        if ends_in_separator || self.base_path.file_name().is_none() {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!(
                    "base_path '{}' does not end in a file name prefix",
                    self.base_path.display()
                ),
            ));
        }
        Ok(())
    }

    /// Directory the log files are written to
    pub fn output_dir(&self) -> Option<&Path> {
        self.base_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }
}
