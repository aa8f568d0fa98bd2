//! # Triggered Buffer
//!
//! A log buffering stage that sits between a log producer and a downstream
//! sink. Recent events are held in a bounded, ordered buffer and released to
//! the sink only when an event at or above a trigger level arrives. Without a
//! trigger, low-severity events accumulate and the oldest are silently
//! discarded once the buffer is full.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure policy, no I/O, no locks
//!   - `TriggeredBuffer`: append, release, trim
//!   - `BufferConfig`: raw configuration with validation
//!   - `BufferSettings`: validated, typed configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `TriggeredBufferApi`: Driving port (inbound API)
//!   - `LogSink`: Driven port (downstream handoff)
//!   - `LogWriter`: Driven port (async downstream write)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `TriggeredBufferService`: Implements `TriggeredBufferApi` under a mutex
//!
//! - **Adapters Layer** (`adapters/`): Concrete sinks
//!   - `InMemorySink`, `TracingSink`, `ChannelSink`
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: After every admission, pending events <= `queue_size`
//! - **INVARIANT-2**: Released events reach the sink oldest first, once each
//! - **INVARIANT-3**: A triggering event is itself released, last
//!
//! ## Data Loss
//!
//! Evicted events and events still pending at shutdown are lost. This is
//! the intended behavior of the stage.
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use relay_types::{LogEvent, LogLevel};
//! use triggered_buffer::{BufferConfig, InMemorySink, TriggeredBufferApi, TriggeredBufferService};
//!
//! let sink = Arc::new(InMemorySink::new());
//! let buffer = TriggeredBufferService::new(&BufferConfig::new(3, "Error"), sink.clone())?;
//!
//! buffer.admit(LogEvent::new(LogLevel::Debug, "app", "connecting"));
//! buffer.admit(LogEvent::new(LogLevel::Error, "app", "connection refused"));
//!
//! assert_eq!(sink.len(), 2);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{ChannelSink, ForwardStats, InMemorySink, TracingSink};
pub use domain::{AdmitReport, BufferConfig, BufferConfigBuilder, BufferSettings, TriggeredBuffer};
pub use error::{BufferError, ConfigError, SinkError};
pub use metrics::{BufferMetrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{LogSink, LogWriter, TriggeredBufferApi};
pub use service::TriggeredBufferService;

#[cfg(feature = "metrics")]
pub use metrics::PrometheusMetrics;
