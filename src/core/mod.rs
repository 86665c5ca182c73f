//! Core logger types and traits

pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod queue;
pub mod sink;
pub mod worker;

pub use config::{LoggerConfig, DEFAULT_BASE_PATH, DEFAULT_MAX_FILE_SIZE};
pub use error::{LoggerError, Result};
pub use log_entry::{LogEntry, TIMESTAMP_FORMAT};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, WORKER_THREAD_NAME};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use queue::{HandoffQueue, Pop};
pub use sink::Sink;
pub use worker::{SinkErrorCallback, Worker, WorkerState};
