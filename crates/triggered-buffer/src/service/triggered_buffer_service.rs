//! Triggered Buffer Service
//!
//! Wraps the pure [`TriggeredBuffer`] policy in a mutex and connects it to a
//! [`LogSink`].
//!
//! ## Thread Safety
//!
//! One `parking_lot::Mutex` guards the whole buffer. Append, release and trim
//! all happen while it is held, including every `write_async` call made
//! during a release. Concurrent admitters therefore observe the buffer as if
//! admissions were serialized, and a release can never interleave with
//! another caller's trim. A sink that blocks holds every other admitter
//! behind it.
//!
//! ## Data Loss
//!
//! Losing events is part of the contract, not a failure:
//! - the capacity bound evicts the oldest pending event;
//! - `reinitialize` discards whatever is pending;
//! - dropping the service drops whatever is pending.

use parking_lot::Mutex;
use relay_types::LogEvent;
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::domain::{BufferConfig, BufferSettings, TriggeredBuffer};
use crate::error::BufferError;
use crate::metrics::{BufferMetrics, MetricsRecorder};
use crate::ports::{LogSink, TriggeredBufferApi};

/// Triggered buffer service implementation
///
/// Implements the `TriggeredBufferApi` port using an injected sink.
pub struct TriggeredBufferService<S: LogSink> {
    /// Downstream sink (driven port)
    sink: Arc<S>,
    /// Pending events and the settings they are held under
    state: Mutex<TriggeredBuffer>,
    /// Counters for every admission outcome
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: LogSink> TriggeredBufferService<S> {
    /// Name under which hosts register this stage.
    pub const TARGET_NAME: &'static str = "QueuedWrapper";

    /// Validate `config` and create an empty buffer feeding `sink`.
    pub fn new(config: &BufferConfig, sink: Arc<S>) -> Result<Self, BufferError> {
        Self::with_metrics(config, sink, Arc::new(BufferMetrics::new()))
    }

    /// Same as [`new`](Self::new) with a custom metrics recorder.
    pub fn with_metrics(
        config: &BufferConfig,
        sink: Arc<S>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, BufferError> {
        let settings = config.validate()?;
        Ok(Self::from_settings(settings, sink, metrics))
    }

    /// Create from already validated settings.
    pub fn from_settings(
        settings: BufferSettings,
        sink: Arc<S>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        info!(
            target_name = Self::TARGET_NAME,
            queue_size = settings.queue_size,
            trigger_level = %settings.trigger_level,
            "Triggered buffer initialized"
        );

        Self {
            sink,
            state: Mutex::new(TriggeredBuffer::new(settings)),
            metrics,
        }
    }
}

impl<S: LogSink> TriggeredBufferApi for TriggeredBufferService<S> {
    fn admit(&self, event: LogEvent) {
        let level = event.level;
        let mut state = self.state.lock();

        self.metrics.record_admitted(level);
        let report = state.admit(event, |pending| self.sink.write_async(pending));

        if report.triggered {
            self.metrics.record_trigger(report.drained);
            debug!(
                level = %level,
                drained = report.drained,
                "Trigger level reached, buffer released"
            );
        }

        if let Some(evicted) = report.evicted {
            self.metrics.record_evicted();
            trace!(
                event_id = %evicted.id,
                level = %evicted.level,
                queue_size = state.settings().queue_size,
                "Buffer full, oldest event evicted"
            );
        }
    }

    fn reinitialize(&self, config: &BufferConfig) -> Result<(), BufferError> {
        let settings = config.validate()?;

        let mut state = self.state.lock();
        let pending = state.take_pending();
        *state = TriggeredBuffer::new(settings);
        drop(state);

        let discarded = pending.len();
        if discarded > 0 {
            self.metrics.record_discarded(discarded);
        }
        info!(
            queue_size = settings.queue_size,
            trigger_level = %settings.trigger_level,
            discarded,
            "Triggered buffer re-initialized"
        );
        Ok(())
    }

    fn settings(&self) -> BufferSettings {
        self.state.lock().settings()
    }

    fn len(&self) -> usize {
        self.state.lock().len()
    }

    fn pending(&self) -> Vec<LogEvent> {
        self.state.lock().iter().cloned().collect()
    }
}
