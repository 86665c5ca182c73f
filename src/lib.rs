//! # Async File Logger
//!
//! An asynchronous logger: callers submit messages without touching any I/O,
//! and a single background thread formats them and writes them to the
//! console and to log files.
//!
//! ## Features
//!
//! - **Non-blocking producers**: `log` filters, timestamps and enqueues
//! - **Strict ordering**: one FIFO queue, one worker, so every sink sees
//!   entries in the order they were accepted
//! - **Lossless shutdown**: dropping the logger drains the queue first
//! - **Per-level files**: `<base>_DEBUG.log`, `<base>_INFO.log`, ... or a
//!   single `<base>.log`
//! - **Plain or structured lines**, colored console output
//!
//! ```no_run
//! use async_file_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .base_path("logs/logfile")
//!     .min_level(LogLevel::Info)
//!     .build()?;
//!
//! logger.info("service started");
//! logger.warning("disk almost full");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleSink, FileSink};
    pub use crate::core::{
        LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        OutputFormat, Result, Sink, SinkErrorCallback,
    };
}

pub use appenders::{ConsoleSink, FileSink};
pub use core::{
    HandoffQueue, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, OutputFormat, Pop, Result, Sink, SinkErrorCallback, Worker, WorkerState,
};
