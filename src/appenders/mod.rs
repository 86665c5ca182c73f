//! Sink implementations

pub mod console;
pub mod file;

pub use console::ConsoleSink;
pub use file::{FileSink, LOG_FILE_EXTENSION};

pub use crate::core::Sink;
