//! Outbound Ports (Driven Ports)
//!
//! What the buffer needs from the downstream side.
//!
//! `LogSink` is the narrow handoff the buffer calls while releasing. It is
//! invoked inside the buffer's critical section, so implementations should
//! return quickly and must never admit into the buffer that feeds them.
//!
//! `LogWriter` is the async, fallible write used by adapters that move the
//! actual I/O off the admitting thread (see `ChannelSink`).

use async_trait::async_trait;
use relay_types::LogEvent;
use std::sync::Arc;

use crate::error::SinkError;

/// Downstream handoff (Driven Port)
///
/// Handoff semantics: once `write_async` returns, the event belongs to the
/// sink. The buffer does not wait for completion and does not retry.
pub trait LogSink: Send + Sync {
    /// Accept an event for eventual processing.
    fn write_async(&self, event: LogEvent);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write_async(&self, event: LogEvent) {
        (**self).write_async(event)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write_async(&self, event: LogEvent) {
        (**self).write_async(event)
    }
}

/// Asynchronous log writer (Driven Port)
#[async_trait]
pub trait LogWriter: Send + Sync {
    /// Persist or transmit one event.
    async fn write(&self, event: LogEvent) -> Result<(), SinkError>;
}
