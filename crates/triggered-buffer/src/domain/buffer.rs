//! Triggered buffer policy
//!
//! The pure, single-threaded core: an ordered queue of pending events, a
//! release trigger and a capacity bound. No locking and no I/O happen here;
//! the service layer wraps this in a mutex and supplies the sink.
//!
//! ## Admission order
//!
//! Every admission runs three fixed steps:
//!
//! 1. Append the event to the tail.
//! 2. If the event's level is at or above the trigger level, hand every
//!    pending event to the sink, oldest first. The triggering event goes last.
//! 3. If the queue is longer than `queue_size`, drop the single oldest event.
//!
//! Because release precedes trimming, a triggering event is never evicted.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: `len() <= queue_size` once `admit` returns.
//! - **INVARIANT-2**: released events leave in arrival order, each exactly once.
//! - **INVARIANT-3**: at most one event is evicted per admission.

use relay_types::LogEvent;
use std::collections::VecDeque;

use super::config::BufferSettings;

/// Upper bound on the capacity reserved up front. Larger queues grow on demand.
pub const MAX_CAPACITY_HINT: usize = 1024;

/// What a single admission did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdmitReport {
    /// Whether the admitted event met the trigger level.
    pub triggered: bool,
    /// Number of events handed to the sink.
    pub drained: usize,
    /// Event dropped by the capacity bound, if any.
    pub evicted: Option<LogEvent>,
}

/// Bounded, level-triggered event queue.
#[derive(Debug)]
pub struct TriggeredBuffer {
    settings: BufferSettings,
    queue: VecDeque<LogEvent>,
}

impl TriggeredBuffer {
    /// Create an empty buffer. `queue_size` is used as a capacity hint,
    /// capped at [`MAX_CAPACITY_HINT`].
    pub fn new(settings: BufferSettings) -> Self {
        Self {
            queue: VecDeque::with_capacity(settings.queue_size.min(MAX_CAPACITY_HINT)),
            settings,
        }
    }

    /// Admit one event, releasing through `deliver` if it triggers.
    pub fn admit<F>(&mut self, event: LogEvent, mut deliver: F) -> AdmitReport
    where
        F: FnMut(LogEvent),
    {
        let triggered = event.is_at_least(self.settings.trigger_level);
        self.queue.push_back(event);

        let mut drained = 0;
        if triggered {
            while let Some(pending) = self.queue.pop_front() {
                deliver(pending);
                drained += 1;
            }
        }

        let evicted = if self.queue.len() > self.settings.queue_size {
            self.queue.pop_front()
        } else {
            None
        };

        AdmitReport {
            triggered,
            drained,
            evicted,
        }
    }

    /// Settings this buffer runs with.
    pub fn settings(&self) -> BufferSettings {
        self.settings
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEvent> {
        self.queue.iter()
    }

    /// Remove and return every pending event without releasing them.
    pub fn take_pending(&mut self) -> Vec<LogEvent> {
        self.queue.drain(..).collect()
    }
}
