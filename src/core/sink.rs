//! Sink trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// An output destination driven by the logger's worker thread.
///
/// Sinks are owned and called by the worker only, so implementations need
/// no internal locking. `formatted` is the already rendered line without a
/// trailing newline.
pub trait Sink: Send {
    fn write(&mut self, entry: &LogEntry, formatted: &str) -> Result<()>;

    /// Release any held resources. Called once, after the last write.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
