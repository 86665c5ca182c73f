//! Log entry structure

use super::log_level::LogLevel;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp layout bound into every entry (local time, second resolution)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A captured log record.
///
/// The timestamp is taken on the producer's thread when the entry is built,
/// not when the worker gets around to writing it. The message is kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Build an entry with an explicit, already formatted timestamp
    pub fn with_timestamp(
        level: LogLevel,
        message: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }
}
