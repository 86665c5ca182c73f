//! Output format configuration for log entries
//!
//! Two renderings are supported:
//! - Text: `<timestamp> [<LEVEL>] <message>` (default)
//! - Json: a single-line object with `timestamp`, `level` and `message`
//!
//! Formatting is a pure function of the entry. The message is inserted
//! as-is in both formats; a `"` inside a message produces a line that is
//! not valid JSON.

use super::log_entry::LogEntry;
use serde::{Deserialize, Serialize};

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `2025-01-08 10:30:45 [INFO] Request processed`
    #[default]
    Text,

    /// Structured single-line format
    ///
    /// Example: `{"timestamp":"2025-01-08 10:30:45","level":"INFO","message":"Request processed"}`
    Json,
}

impl OutputFormat {
    /// Pick the format from a "structured output" switch
    pub fn structured(enabled: bool) -> Self {
        if enabled {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }

    /// Format a log entry according to this output format
    pub fn format(&self, entry: &LogEntry) -> String {
        match self {
            OutputFormat::Text => Self::format_text(entry),
            OutputFormat::Json => Self::format_json(entry),
        }
    }

    fn format_text(entry: &LogEntry) -> String {
        format!(
            "{} [{}] {}",
            entry.timestamp,
            entry.level.to_str(),
            entry.message
        )
    }

    // Field order is fixed; values are written without escaping.
    fn format_json(entry: &LogEntry) -> String {
        format!(
            "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":\"{}\"}}",
            entry.timestamp,
            entry.level.to_str(),
            entry.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    fn hello() -> LogEntry {
        LogEntry::with_timestamp(LogLevel::Debug, "hello", "2024-01-01 00:00:00")
    }

    #[test]
    fn test_text_format() {
        assert_eq!(
            OutputFormat::Text.format(&hello()),
            "2024-01-01 00:00:00 [DEBUG] hello"
        );
    }

    #[test]
    fn test_json_format() {
        let line = OutputFormat::Json.format(&hello());
        assert_eq!(
            line,
            r#"{"timestamp":"2024-01-01 00:00:00","level":"DEBUG","message":"hello"}"#
        );

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["timestamp"], "2024-01-01 00:00:00");
        assert_eq!(parsed["level"], "DEBUG");
        assert_eq!(parsed["message"], "hello");
    }

    #[test]
    fn test_json_field_order() {
        let line = OutputFormat::Json.format(&hello());
        let ts = line.find("\"timestamp\"").unwrap();
        let level = line.find("\"level\"").unwrap();
        let message = line.find("\"message\"").unwrap();
        assert!(ts < level && level < message);
    }

    #[test]
    fn test_json_quote_is_not_escaped() {
        let entry = LogEntry::with_timestamp(LogLevel::Info, r#"say "hi""#, "2024-01-01 00:00:00");
        let line = OutputFormat::Json.format(&entry);
        assert_eq!(
            line,
            r#"{"timestamp":"2024-01-01 00:00:00","level":"INFO","message":"say "hi""}"#
        );
        assert!(serde_json::from_str::<serde_json::Value>(&line).is_err());
    }

    #[test]
    fn test_text_keeps_control_characters() {
        let entry = LogEntry::with_timestamp(LogLevel::Warning, "a\tb", "2024-01-01 00:00:00");
        assert_eq!(
            OutputFormat::Text.format(&entry),
            "2024-01-01 00:00:00 [WARNING] a\tb"
        );
    }

    #[test]
    fn test_structured_switch() {
        assert_eq!(OutputFormat::structured(true), OutputFormat::Json);
        assert_eq!(OutputFormat::structured(false), OutputFormat::Text);
        assert!(OutputFormat::Json.is_structured());
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
