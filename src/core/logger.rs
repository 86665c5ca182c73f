//! Main logger implementation

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    queue::HandoffQueue,
    sink::Sink,
    worker::{panic_message, SinkErrorCallback, Worker},
};
use crate::appenders::{ConsoleSink, FileSink};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

/// Name of the background thread that performs all log I/O
pub const WORKER_THREAD_NAME: &str = "async-file-logger";

/// Asynchronous logger.
///
/// [`log`](Logger::log) only filters, timestamps and enqueues; a single
/// background thread formats entries and writes them to the console and the
/// log files in exactly the order they were accepted.
///
/// Dropping the logger shuts it down: every entry accepted before that point
/// is written and all files are closed before `drop` returns. Entries logged
/// after shutdown has started are discarded and counted in
/// [`LoggerMetrics::rejected_after_shutdown`].
pub struct Logger {
    config: LoggerConfig,
    queue: Arc<HandoffQueue>,
    worker: Option<thread::JoinHandle<()>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a logger with the given configuration and its default sinks
    pub fn new(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::new().config(config).build()
    }

    fn start(
        config: LoggerConfig,
        sinks: Vec<Box<dyn Sink>>,
        on_sink_error: Option<SinkErrorCallback>,
    ) -> Result<Self> {
        config.validate()?;

        if let Some(dir) = config.output_dir() {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    LoggerError::io_operation(
                        "creating log directory",
                        dir.display().to_string(),
                        e,
                    )
                })?;
            }
            if !dir.is_dir() {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    format!("output path '{}' is not a directory", dir.display()),
                ));
            }
        }

        let queue = Arc::new(HandoffQueue::new());
        let metrics = Arc::new(LoggerMetrics::new());

        let mut worker = Worker::new(sinks, config.output_format, Arc::clone(&metrics))
            .with_error_callback(on_sink_error);
        let worker_queue = Arc::clone(&queue);

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker.run(&worker_queue))
            .map_err(|e| {
                LoggerError::io_operation("spawning worker thread", WORKER_THREAD_NAME, e)
            })?;

        Ok(Self {
            config,
            queue,
            worker: Some(handle),
            metrics,
        })
    }

    /// Submit a message. Never blocks on I/O and never fails visibly.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if level < self.config.min_level {
            return;
        }

        let entry = LogEntry::new(level, message.into());
        match self.queue.push(entry) {
            Ok(()) => {
                self.metrics.record_accepted();
            }
            Err(_rejected) => {
                self.metrics.record_rejected();
            }
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn min_level(&self) -> LogLevel {
        self.config.min_level
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```no_run
    /// use async_file_logger::{Logger, LoggerConfig};
    ///
    /// let logger = Logger::new(LoggerConfig::default()).unwrap();
    /// logger.info("hello");
    ///
    /// let metrics = logger.metrics();
    /// println!("Accepted: {}", metrics.accepted());
    /// println!("Sink failures: {}", metrics.sink_failures());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Entries waiting in the queue
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.worker.is_none()
    }

    /// Stop the logger, blocking until every accepted entry is written and
    /// all files are closed.
    ///
    /// There is no timeout: the call returns once the worker has drained the
    /// queue. Calling it again is a no-op.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use async_file_logger::Logger;
    ///
    /// let mut logger = Logger::builder().base_path("logs/app").build().unwrap();
    /// logger.info("Important message");
    /// logger.shutdown().expect("logger worker panicked");
    /// ```
    pub fn shutdown(&mut self) -> Result<()> {
        let Some(handle) = self.worker.take() else {
            return Ok(());
        };

        self.queue.request_shutdown();

        handle
            .join()
            .map_err(|e| LoggerError::WorkerPanicked(panic_message(e)))
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            eprintln!("[LOGGER ERROR] Shutdown failed: {}", e);
        }

        let failures = self.metrics.sink_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shut down after {} sink failures ({} entries written)",
                failures,
                self.metrics.written()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use async_file_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .base_path("logs/service")
///     .min_level(LogLevel::Info)
///     .split_by_level(false)
///     .structured(true)
///     .on_sink_error(Arc::new(|err: &LoggerError| {
///         eprintln!("ALERT: {}", err);
///     }))
///     .build()
///     .expect("failed to start logger");
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    console_colors: Option<bool>,
    console_writer: Option<Box<dyn Write + Send>>,
    extra_sinks: Vec<Box<dyn Sink>>,
    on_sink_error: Option<SinkErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            console_colors: None,
            console_writer: None,
            extra_sinks: Vec::new(),
            on_sink_error: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_path = path.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn split_by_level(mut self, split: bool) -> Self {
        self.config.split_by_level = split;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Shorthand for `output_format(OutputFormat::structured(enabled))`
    #[must_use = "builder methods return a new value"]
    pub fn structured(mut self, enabled: bool) -> Self {
        self.config.output_format = OutputFormat::structured(enabled);
        self
    }

    /// Recorded in the configuration; files are not rotated
    #[must_use = "builder methods return a new value"]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// Enable or disable console output
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Force console colors on or off instead of the platform default
    ///
    /// `colored` still has the last word: with `NO_COLOR` set, or when
    /// standard output is not a terminal, lines are written plain even
    /// after `console_colors(true)`. Use `colored::control::set_override`
    /// to force escapes in that case.
    #[must_use = "builder methods return a new value"]
    pub fn console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = Some(enabled);
        self
    }

    /// Write console output to `writer` instead of standard output
    #[must_use = "builder methods return a new value"]
    pub fn console_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console_writer = Some(Box::new(writer));
        self
    }

    /// Add a sink driven after the console and file sinks
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.extra_sinks.push(Box::new(sink));
        self
    }

    /// Set a callback for sink failures
    ///
    /// The callback runs on the worker thread for every failed write or
    /// close.
    #[must_use = "builder methods return a new value"]
    pub fn on_sink_error(mut self, callback: SinkErrorCallback) -> Self {
        self.on_sink_error = Some(callback);
        self
    }

    /// Build the Logger and start its worker thread
    pub fn build(self) -> Result<Logger> {
        let mut sinks: Vec<Box<dyn Sink>> = Vec::with_capacity(self.extra_sinks.len() + 2);

        if self.config.console {
            let mut console = ConsoleSink::new();
            if let Some(use_colors) = self.console_colors {
                console = console.colors(use_colors);
            }
            if let Some(writer) = self.console_writer {
                console = console.with_writer(writer);
            }
            sinks.push(Box::new(console));
        }

        sinks.push(Box::new(FileSink::new(
            self.config.base_path.clone(),
            self.config.split_by_level,
        )));
        sinks.extend(self.extra_sinks);

        Logger::start(self.config, sinks, self.on_sink_error)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_builder_basic() -> Result<()> {
        let dir = tempdir()?;
        let logger = Logger::builder()
            .base_path(dir.path().join("app"))
            .min_level(LogLevel::Info)
            .console(false)
            .build()?;

        assert_eq!(logger.min_level(), LogLevel::Info);
        assert!(!logger.is_shut_down());
        assert_eq!(logger.metrics().accepted(), 0);
        Ok(())
    }

    #[test]
    fn test_builder_default_config() {
        let builder = LoggerBuilder::default();
        assert_eq!(builder.config, LoggerConfig::default());
    }

    #[test]
    fn test_filtered_entries_never_reach_queue() -> Result<()> {
        let dir = tempdir()?;
        let mut logger = Logger::builder()
            .base_path(dir.path().join("app"))
            .min_level(LogLevel::Warning)
            .console(false)
            .build()?;

        logger.debug("dropped");
        logger.info("dropped");
        assert_eq!(logger.queued(), 0);
        assert_eq!(logger.metrics().accepted(), 0);
        assert_eq!(logger.metrics().rejected_after_shutdown(), 0);

        logger.warning("kept");
        logger.shutdown()?;

        assert_eq!(logger.metrics().accepted(), 1);
        assert!(!dir.path().join("app_DEBUG.log").exists());
        assert!(!dir.path().join("app_INFO.log").exists());
        Ok(())
    }

    #[test]
    fn test_creates_output_directory() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        let mut logger = Logger::builder()
            .base_path(nested.join("app"))
            .split_by_level(false)
            .console(false)
            .build()?;

        assert!(nested.is_dir());
        logger.info("hello");
        logger.shutdown()?;

        let content = fs::read_to_string(nested.join("app.log"))?;
        assert!(content.ends_with("[INFO] hello\n"));
        Ok(())
    }

    #[test]
    fn test_directory_creation_failure() -> Result<()> {
        let dir = tempdir()?;
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "file in the way")?;

        let result = Logger::builder()
            .base_path(blocker.join("logs").join("app"))
            .console(false)
            .build();

        assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
        Ok(())
    }

    #[test]
    fn test_parent_is_a_file_rejected() -> Result<()> {
        let dir = tempdir()?;
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file in the way")?;

        let result = Logger::builder()
            .base_path(blocker.join("app"))
            .console(false)
            .build();

        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert_eq!(fs::read_to_string(&blocker)?, "file in the way");
        Ok(())
    }

    #[test]
    fn test_trailing_separator_rejected() -> Result<()> {
        let dir = tempdir()?;
        let mut base = dir.path().join("sub").into_os_string();
        base.push("/");

        let result = Logger::builder().base_path(base).console(false).build();

        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(!dir.path().join("sub").exists());
        Ok(())
    }

    #[test]
    fn test_empty_base_path_rejected() {
        let result = Logger::builder().base_path("").console(false).build();
        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_shutdown_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let mut logger = Logger::builder()
            .base_path(dir.path().join("app"))
            .console(false)
            .build()?;

        logger.info("once");
        logger.shutdown()?;
        assert!(logger.is_shut_down());
        logger.shutdown()?;

        logger.info("after shutdown");
        assert_eq!(logger.metrics().rejected_after_shutdown(), 1);
        assert_eq!(logger.metrics().written(), 1);
        Ok(())
    }

    #[test]
    fn test_max_file_size_is_kept_but_not_enforced() -> Result<()> {
        let dir = tempdir()?;
        let mut logger = Logger::builder()
            .base_path(dir.path().join("app"))
            .split_by_level(false)
            .max_file_size(16)
            .console(false)
            .build()?;
        assert_eq!(logger.config().max_file_size, 16);

        for i in 0..10 {
            logger.info(format!("a message well over sixteen bytes #{}", i));
        }
        logger.shutdown()?;

        let content = fs::read_to_string(dir.path().join("app.log"))?;
        assert_eq!(content.lines().count(), 10);
        assert!(!dir.path().join("app.1.log").exists());
        Ok(())
    }
}
