//! Console sink implementation

use crate::core::{LogEntry, LogLevel, Result, Sink};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes each line to standard output (or an injected writer), colored by
/// level when colors are enabled.
pub struct ConsoleSink {
    writer: Box<dyn Write + Send>,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
            use_colors: default_colors(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
            use_colors,
        }
    }

    /// Send output to `writer` instead of standard output
    ///
    /// # Example
    ///
    /// ```
    /// use async_file_logger::appenders::ConsoleSink;
    ///
    /// let sink = ConsoleSink::new().with_writer(std::io::stderr());
    /// ```
    #[must_use]
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Enable or disable level colors. When enabled, `colored` still writes
    /// plain text if `NO_COLOR` is set or stdout is not a terminal.
    #[must_use]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// The line as it appears on the console, without the newline
    pub fn render(&self, level: LogLevel, formatted: &str) -> String {
        if self.use_colors {
            colorize(level, formatted)
        } else {
            formatted.to_string()
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, entry: &LogEntry, formatted: &str) -> Result<()> {
        let line = self.render(entry.level, formatted);
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

// Windows consoles get plain lines.
fn default_colors() -> bool {
    cfg!(all(feature = "console", not(windows)))
}

#[cfg(feature = "console")]
fn colorize(level: LogLevel, formatted: &str) -> String {
    formatted.color(level.color_code()).to_string()
}

#[cfg(not(feature = "console"))]
fn colorize(_level: LogLevel, formatted: &str) -> String {
    formatted.to_string()
}
