//! File sink implementation
//!
//! Keeps at most one open handle per key. With per-level splitting the key
//! is the entry's level; otherwise every level shares the `Debug` key and a
//! single file. Handles are opened lazily in append mode and live until the
//! sink is closed.

use crate::core::{LogEntry, LogLevel, LoggerError, Result, Sink};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension appended to every log file name
pub const LOG_FILE_EXTENSION: &str = ".log";

/// Key all levels share when files are not split
const SHARED_KEY: LogLevel = LogLevel::Debug;

pub struct FileSink {
    base_path: PathBuf,
    split_by_level: bool,
    handles: HashMap<LogLevel, BufWriter<File>>,
}

impl FileSink {
    pub fn new(base_path: impl Into<PathBuf>, split_by_level: bool) -> Self {
        Self {
            base_path: base_path.into(),
            split_by_level,
            handles: HashMap::new(),
        }
    }

    /// File an entry of `level` is appended to
    ///
    /// # Examples
    ///
    /// ```
    /// use async_file_logger::appenders::FileSink;
    /// use async_file_logger::LogLevel;
    /// use std::path::PathBuf;
    ///
    /// let split = FileSink::new("logs/app", true);
    /// assert_eq!(split.path_for(LogLevel::Warning), PathBuf::from("logs/app_WARNING.log"));
    ///
    /// let shared = FileSink::new("logs/app", false);
    /// assert_eq!(shared.path_for(LogLevel::Warning), PathBuf::from("logs/app.log"));
    /// ```
    pub fn path_for(&self, level: LogLevel) -> PathBuf {
        file_name_for(&self.base_path, self.split_by_level.then_some(level))
    }

    /// Number of currently open file handles
    pub fn open_handles(&self) -> usize {
        self.handles.len()
    }

    fn key_for(&self, level: LogLevel) -> LogLevel {
        if self.split_by_level {
            level
        } else {
            SHARED_KEY
        }
    }

    fn handle(&mut self, key: LogLevel) -> Result<&mut BufWriter<File>> {
        if !self.handles.contains_key(&key) {
            let path = self.path_for(key);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    LoggerError::file_sink(path.display().to_string(), "cannot open log file", e)
                })?;
            self.handles.insert(key, BufWriter::new(file));
        }

        self.handles
            .get_mut(&key)
            .ok_or_else(|| LoggerError::other("file handle missing after open"))
    }
}

impl Sink for FileSink {
    fn write(&mut self, entry: &LogEntry, formatted: &str) -> Result<()> {
        let key = self.key_for(entry.level);
        let writer = self.handle(key)?;

        // Flushed per entry so a crash never loses a completed write.
        let result = writeln!(writer, "{}", formatted).and_then(|()| writer.flush());
        result.map_err(|e| {
            LoggerError::file_sink(self.path_for(key).display().to_string(), "cannot write", e)
        })
    }

    fn close(&mut self) -> Result<()> {
        let mut first_error = None;
        for (key, mut writer) in self.handles.drain() {
            if let Err(e) = writer.flush() {
                let path = file_name_for(&self.base_path, self.split_by_level.then_some(key));
                first_error.get_or_insert(LoggerError::file_sink(
                    path.display().to_string(),
                    "cannot flush on close",
                    e,
                ));
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn file_name_for(base_path: &Path, level: Option<LogLevel>) -> PathBuf {
    let mut name = base_path.as_os_str().to_owned();
    if let Some(level) = level {
        name.push("_");
        name.push(level.to_str());
    }
    name.push(LOG_FILE_EXTENSION);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutputFormat;
    use std::fs;
    use tempfile::tempdir;

    fn write(sink: &mut FileSink, level: LogLevel, message: &str) -> Result<()> {
        let entry = LogEntry::with_timestamp(level, message, "2024-01-01 00:00:00");
        let line = OutputFormat::Text.format(&entry);
        sink.write(&entry, &line)
    }

    #[test]
    fn test_split_files() -> Result<()> {
        let dir = tempdir()?;
        let base = dir.path().join("app");
        let mut sink = FileSink::new(&base, true);

        for level in LogLevel::ALL {
            write(&mut sink, level, "one")?;
        }
        write(&mut sink, LogLevel::Info, "two")?;
        assert_eq!(sink.open_handles(), 4);

        for level in LogLevel::ALL {
            let content = fs::read_to_string(dir.path().join(format!("app_{}.log", level)))?;
            for line in content.lines() {
                assert!(line.contains(&format!("[{}]", level)));
            }
        }

        let info = fs::read_to_string(dir.path().join("app_INFO.log"))?;
        assert_eq!(
            info,
            "2024-01-01 00:00:00 [INFO] one\n2024-01-01 00:00:00 [INFO] two\n"
        );
        Ok(())
    }

    #[test]
    fn test_shared_file() -> Result<()> {
        let dir = tempdir()?;
        let base = dir.path().join("app");
        let mut sink = FileSink::new(&base, false);

        write(&mut sink, LogLevel::Error, "e")?;
        write(&mut sink, LogLevel::Debug, "d")?;
        write(&mut sink, LogLevel::Warning, "w")?;
        assert_eq!(sink.open_handles(), 1);

        let content = fs::read_to_string(dir.path().join("app.log"))?;
        let messages: Vec<&str> = content
            .lines()
            .map(|line| line.rsplit(' ').next().unwrap())
            .collect();
        assert_eq!(messages, vec!["e", "d", "w"]);
        assert!(!dir.path().join("app_DEBUG.log").exists());
        Ok(())
    }

    #[test]
    fn test_appends_to_existing_content() -> Result<()> {
        let dir = tempdir()?;
        let base = dir.path().join("app");
        fs::write(dir.path().join("app.log"), "previous run\n")?;

        let mut sink = FileSink::new(&base, false);
        write(&mut sink, LogLevel::Info, "new")?;

        let content = fs::read_to_string(dir.path().join("app.log"))?;
        assert_eq!(content, "previous run\n2024-01-01 00:00:00 [INFO] new\n");
        Ok(())
    }

    #[test]
    fn test_written_content_visible_without_close() -> Result<()> {
        let dir = tempdir()?;
        let mut sink = FileSink::new(dir.path().join("app"), true);
        write(&mut sink, LogLevel::Error, "flushed")?;

        let content = fs::read_to_string(dir.path().join("app_ERROR.log"))?;
        assert!(content.ends_with("flushed\n"));
        Ok(())
    }

    #[test]
    fn test_close_releases_handles() -> Result<()> {
        let dir = tempdir()?;
        let mut sink = FileSink::new(dir.path().join("app"), true);
        write(&mut sink, LogLevel::Debug, "a")?;
        write(&mut sink, LogLevel::Info, "b")?;

        sink.close()?;
        assert_eq!(sink.open_handles(), 0);
        Ok(())
    }

    #[test]
    fn test_open_failure_is_reported() {
        let dir = tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("missing").join("app"), true);

        let err = write(&mut sink, LogLevel::Info, "lost").unwrap_err();
        assert!(matches!(err, LoggerError::FileSinkError { .. }));
        assert!(err.to_string().contains("app_INFO.log"));
        assert_eq!(sink.open_handles(), 0);
    }
}
