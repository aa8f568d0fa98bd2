//! In-memory sink
//!
//! Collects every handed-off event in arrival order. Used by tests and by
//! hosts that want to inspect what a release produced.

use parking_lot::Mutex;
use relay_types::LogEvent;

use crate::ports::LogSink;

/// Sink that keeps released events in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event received so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Remove and return every event received so far.
    pub fn take(&self) -> Vec<LogEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl LogSink for InMemorySink {
    fn write_async(&self, event: LogEvent) {
        self.events.lock().push(event);
    }
}
