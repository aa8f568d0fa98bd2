//! Metrics hooks for buffer operations
//!
//! Counts what happened to every admitted event. Each admitted event ends up
//! in exactly one bucket: released to the sink, evicted by the capacity
//! bound, discarded by a re-initialization, or still pending. So for a
//! quiescent buffer:
//!
//! ```text
//! admitted == drained + evicted + discarded_on_reinit + len()
//! ```
//!
//! ## Prometheus
//!
//! Enable with the `metrics` feature to get [`PrometheusMetrics`], which
//! exports the same counters to the default Prometheus registry:
//!
//! - `triggered_buffer_events_admitted_total`
//! - `triggered_buffer_triggers_total`
//! - `triggered_buffer_events_drained_total`
//! - `triggered_buffer_events_evicted_total`
//! - `triggered_buffer_events_discarded_total`

use relay_types::LogLevel;
use std::sync::atomic::{AtomicU64, Ordering};

/// Trait for custom metrics recording implementations
pub trait MetricsRecorder: Send + Sync {
    /// An event was appended.
    fn record_admitted(&self, level: LogLevel);

    /// A triggering event released `drained` events.
    fn record_trigger(&self, drained: usize);

    /// One event was dropped by the capacity bound.
    fn record_evicted(&self);

    /// Pending events were thrown away by re-initialization.
    fn record_discarded(&self, count: usize);
}

/// Thread-safe in-process counters.
#[derive(Debug, Default)]
pub struct BufferMetrics {
    pub admitted: AtomicU64,
    pub triggers: AtomicU64,
    pub drained: AtomicU64,
    pub evicted: AtomicU64,
    pub discarded_on_reinit: AtomicU64,
}

impl BufferMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            admitted: self.admitted.load(Ordering::Relaxed),
            triggers: self.triggers.load(Ordering::Relaxed),
            drained: self.drained.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            discarded_on_reinit: self.discarded_on_reinit.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.admitted.store(0, Ordering::Relaxed);
        self.triggers.store(0, Ordering::Relaxed);
        self.drained.store(0, Ordering::Relaxed);
        self.evicted.store(0, Ordering::Relaxed);
        self.discarded_on_reinit.store(0, Ordering::Relaxed);
    }
}

impl MetricsRecorder for BufferMetrics {
    fn record_admitted(&self, _level: LogLevel) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    fn record_trigger(&self, drained: usize) {
        self.triggers.fetch_add(1, Ordering::Relaxed);
        self.drained.fetch_add(drained as u64, Ordering::Relaxed);
    }

    fn record_evicted(&self) {
        self.evicted.fetch_add(1, Ordering::Relaxed);
    }

    fn record_discarded(&self, count: usize) {
        self.discarded_on_reinit
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub admitted: u64,
    pub triggers: u64,
    pub drained: u64,
    pub evicted: u64,
    pub discarded_on_reinit: u64,
}

impl MetricsSnapshot {
    /// Events that have left the buffer by any route.
    pub fn departed(&self) -> u64 {
        self.drained + self.evicted + self.discarded_on_reinit
    }
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_admitted(&self, _: LogLevel) {}
    fn record_trigger(&self, _: usize) {}
    fn record_evicted(&self) {}
    fn record_discarded(&self, _: usize) {}
}

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Events admitted, labeled by level
    pub static ref EVENTS_ADMITTED: IntCounterVec = register_int_counter_vec!(
        "triggered_buffer_events_admitted_total",
        "Total number of events admitted to the buffer",
        &["level"]
    )
    .expect("Failed to create EVENTS_ADMITTED metric");

    /// Trigger events that released the buffer
    pub static ref TRIGGERS: IntCounter = register_int_counter!(
        "triggered_buffer_triggers_total",
        "Total number of buffer releases"
    )
    .expect("Failed to create TRIGGERS metric");

    /// Events handed to the sink
    pub static ref EVENTS_DRAINED: IntCounter = register_int_counter!(
        "triggered_buffer_events_drained_total",
        "Total number of events handed to the sink"
    )
    .expect("Failed to create EVENTS_DRAINED metric");

    /// Events dropped by the capacity bound
    pub static ref EVENTS_EVICTED: IntCounter = register_int_counter!(
        "triggered_buffer_events_evicted_total",
        "Total number of events evicted by the capacity bound"
    )
    .expect("Failed to create EVENTS_EVICTED metric");

    /// Events thrown away by re-initialization
    pub static ref EVENTS_DISCARDED: IntCounter = register_int_counter!(
        "triggered_buffer_events_discarded_total",
        "Total number of pending events discarded on re-initialization"
    )
    .expect("Failed to create EVENTS_DISCARDED metric");
}

/// Recorder that forwards to the process-wide Prometheus counters.
#[cfg(feature = "metrics")]
#[derive(Debug, Default)]
pub struct PrometheusMetrics;

#[cfg(feature = "metrics")]
impl MetricsRecorder for PrometheusMetrics {
    fn record_admitted(&self, level: LogLevel) {
        EVENTS_ADMITTED.with_label_values(&[level.as_str()]).inc();
    }

    fn record_trigger(&self, drained: usize) {
        TRIGGERS.inc();
        EVENTS_DRAINED.inc_by(drained as u64);
    }

    fn record_evicted(&self) {
        EVENTS_EVICTED.inc();
    }

    fn record_discarded(&self, count: usize) {
        EVENTS_DISCARDED.inc_by(count as u64);
    }
}
