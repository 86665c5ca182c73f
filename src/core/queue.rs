//! Handoff queue between producers and the worker
//!
//! An unbounded FIFO guarded by a single mutex, with a condition variable
//! the worker sleeps on. Producers never block on capacity: a producer that
//! outpaces the sinks grows the queue instead.

use super::log_entry::LogEntry;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// Result of a blocking pop
#[derive(Debug, PartialEq, Eq)]
pub enum Pop {
    /// The oldest pending entry
    Event(LogEntry),
    /// Shutdown was requested and nothing is left to drain
    Shutdown,
}

#[derive(Debug, Default)]
struct QueueState {
    events: VecDeque<LogEntry>,
    shutdown: bool,
}

#[derive(Debug, Default)]
pub struct HandoffQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl HandoffQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and wake the consumer.
    ///
    /// Once shutdown has been requested the entry is handed back instead of
    /// queued, since the worker may already have observed an empty queue.
    pub fn push(&self, entry: LogEntry) -> std::result::Result<(), LogEntry> {
        {
            let mut state = self.state.lock();
            if state.shutdown {
                return Err(entry);
            }
            state.events.push_back(entry);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Wait until an entry is available or shutdown is requested.
    ///
    /// Pending entries are always returned before `Pop::Shutdown`, so a
    /// consumer looping until `Shutdown` drains everything pushed before
    /// the request.
    pub fn pop_blocking(&self) -> Pop {
        let mut state = self.state.lock();
        loop {
            if let Some(entry) = state.events.pop_front() {
                return Pop::Event(entry);
            }
            if state.shutdown {
                return Pop::Shutdown;
            }
            self.available.wait(&mut state);
        }
    }

    /// Set the shutdown flag and wake the consumer
    pub fn request_shutdown(&self) {
        self.state.lock().shutdown = true;
        self.available.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.state.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.state.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
