//! Background worker draining the handoff queue
//!
//! The worker is the only owner of the sinks. It pops one entry at a time,
//! formats it once and hands the line to every sink in order. A failing or
//! panicking sink is reported and skipped; it never stops the loop or keeps
//! the other sinks from receiving the entry.

use super::{
    error::LoggerError,
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    queue::{HandoffQueue, Pop},
    sink::Sink,
};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Callback invoked with every sink failure seen by the worker
pub type SinkErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Print to stderr on the first failure and every this many thereafter
const STDERR_REPORT_INTERVAL: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting for or processing entries
    Running,
    /// Shutdown observed with an empty queue; closing sinks
    Draining,
    /// Sinks closed, no further dequeues
    Stopped,
}

pub struct Worker {
    sinks: Vec<Box<dyn Sink>>,
    format: OutputFormat,
    metrics: Arc<LoggerMetrics>,
    on_error: Option<SinkErrorCallback>,
    state: WorkerState,
}

impl Worker {
    pub fn new(
        sinks: Vec<Box<dyn Sink>>,
        format: OutputFormat,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            sinks,
            format,
            metrics,
            on_error: None,
            state: WorkerState::Running,
        }
    }

    #[must_use]
    pub fn with_error_callback(mut self, callback: Option<SinkErrorCallback>) -> Self {
        self.on_error = callback;
        self
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Run until shutdown is requested and the queue is empty, then close
    /// every sink.
    pub fn run(&mut self, queue: &HandoffQueue) {
        while self.state == WorkerState::Running {
            match queue.pop_blocking() {
                Pop::Event(entry) => self.process(&entry),
                Pop::Shutdown => self.state = WorkerState::Draining,
            }
        }
        self.close_sinks();
        self.state = WorkerState::Stopped;
    }

    /// Format one entry and write it to every sink
    pub fn process(&mut self, entry: &LogEntry) {
        let formatted = self.format.format(entry);
        let mut failures = Vec::new();

        for sink in self.sinks.iter_mut() {
            let result = catch_unwind(AssertUnwindSafe(|| sink.write(entry, &formatted)));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => failures.push((sink.name().to_string(), e)),
                Err(panic_info) => {
                    let name = sink.name().to_string();
                    let err = LoggerError::sink_panicked(name.clone(), panic_message(panic_info));
                    failures.push((name, err));
                }
            }
        }

        for (name, err) in failures {
            self.report(&name, "write", &err);
        }
        self.metrics.record_written();
    }

    fn close_sinks(&mut self) {
        let mut failures = Vec::new();
        for sink in self.sinks.iter_mut() {
            let result = catch_unwind(AssertUnwindSafe(|| sink.close()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => failures.push((sink.name().to_string(), e)),
                Err(panic_info) => {
                    let name = sink.name().to_string();
                    let err = LoggerError::sink_panicked(name.clone(), panic_message(panic_info));
                    failures.push((name, err));
                }
            }
        }

        for (name, err) in failures {
            self.report(&name, "close", &err);
        }
    }

    fn report(&self, sink_name: &str, operation: &str, err: &LoggerError) {
        let previous = self.metrics.record_sink_failure();
        if previous == 0 || (previous + 1) % STDERR_REPORT_INTERVAL == 0 {
            eprintln!(
                "[LOGGER ERROR] Sink '{}' {} failed: {} ({} sink failures so far)",
                sink_name,
                operation,
                err,
                previous + 1
            );
        }

        if let Some(ref callback) = self.on_error {
            callback(err);
        }
    }
}

pub(crate) fn panic_message(panic_info: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
