//! Inbound Ports (Driving Ports)
//!
//! The API a log producer uses to feed the buffer.

use relay_types::LogEvent;

use crate::domain::{BufferConfig, BufferSettings};
use crate::error::BufferError;

/// Primary triggered buffer API (Driving Port)
pub trait TriggeredBufferApi: Send + Sync {
    /// Admit one event.
    ///
    /// Appends the event, releases the whole buffer to the sink if the event
    /// meets the trigger level, then drops the oldest event if the buffer is
    /// over capacity. Runs atomically with respect to other admissions and
    /// never fails.
    fn admit(&self, event: LogEvent);

    /// Replace configuration and buffer contents.
    ///
    /// Pending events are discarded, not released. On error the current
    /// configuration and contents are left untouched.
    fn reinitialize(&self, config: &BufferConfig) -> Result<(), BufferError>;

    /// Settings currently in force.
    fn settings(&self) -> BufferSettings;

    /// Number of pending events.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of pending events, oldest first.
    fn pending(&self) -> Vec<LogEvent>;
}
