//! # Log Event
//!
//! The unit that flows from producer to buffer to sink.
//!
//! Events are moved, never shared: the producer hands ownership to the
//! buffer on admission and the buffer hands it to the sink on release.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::level::LogLevel;

/// A single log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Unique event identifier, assigned at creation.
    pub id: Uuid,
    /// Severity of the event.
    pub level: LogLevel,
    /// Name of the logger that produced the event.
    pub logger: String,
    /// Rendered message.
    pub message: String,
    /// Unix timestamp in milliseconds when the event was created.
    pub timestamp_ms: u64,
    /// Structured properties attached by the producer.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl LogEvent {
    /// Create an event stamped with a fresh id and the current time.
    pub fn new(level: LogLevel, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            logger: logger.into(),
            message: message.into(),
            timestamp_ms: now_ms(),
            properties: BTreeMap::new(),
        }
    }

    /// Attach a structured property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Whether this event meets or exceeds `threshold`.
    pub fn is_at_least(&self, threshold: LogLevel) -> bool {
        self.level >= threshold
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
