//! Logger metrics for observability
//!
//! Counters for monitoring logger health. Sink failures are never returned
//! to producers, so `sink_failures` is the place to look for them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use async_file_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_accepted();
/// metrics.record_written();
///
/// assert_eq!(metrics.accepted(), 1);
/// assert_eq!(metrics.written(), 1);
/// assert_eq!(metrics.pending(), 0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries pushed onto the handoff queue
    accepted: AtomicU64,

    /// Entries the worker has finished with (every sink attempted)
    written: AtomicU64,

    /// Individual sink write or close failures
    sink_failures: AtomicU64,

    /// Entries refused because shutdown had already been requested
    rejected_after_shutdown: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            written: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            rejected_after_shutdown: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_after_shutdown(&self) -> u64 {
        self.rejected_after_shutdown.load(Ordering::Relaxed)
    }

    /// Entries accepted but not yet handled by the worker
    pub fn pending(&self) -> u64 {
        self.accepted().saturating_sub(self.written())
    }

    /// Record an accepted entry, returning the previous count
    #[inline]
    pub fn record_accepted(&self) -> u64 {
        self.accepted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a sink failure, returning the previous count
    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected_after_shutdown.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.accepted.store(0, Ordering::Relaxed);
        self.written.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.rejected_after_shutdown.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            accepted: AtomicU64::new(self.accepted()),
            written: AtomicU64::new(self.written()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            rejected_after_shutdown: AtomicU64::new(self.rejected_after_shutdown()),
        }
    }
}
