//! Tracing sink
//!
//! Re-emits released events through `tracing`, so whatever subscriber the
//! host installed does the formatting and shipping.

use relay_types::{LogEvent, LogLevel};
use tracing::{debug, error, info, trace, warn};

use crate::ports::LogSink;

/// Target used for every re-emitted event.
pub const RELEASE_TARGET: &str = "log_relay::released";

/// Sink that writes each event as a `tracing` event at its own level.
///
/// `Fatal` and `Off` map to `ERROR`, the most severe `tracing` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn write_async(&self, event: LogEvent) {
        let LogEvent {
            id,
            level,
            logger,
            message,
            timestamp_ms,
            properties,
        } = event;

        macro_rules! emit {
            ($mac:ident) => {
                $mac!(
                    target: RELEASE_TARGET,
                    event_id = %id,
                    logger = %logger,
                    timestamp_ms,
                    properties = ?properties,
                    "{}",
                    message
                )
            };
        }

        match level {
            LogLevel::Trace => emit!(trace),
            LogLevel::Debug => emit!(debug),
            LogLevel::Info => emit!(info),
            LogLevel::Warn => emit!(warn),
            LogLevel::Error | LogLevel::Fatal | LogLevel::Off => emit!(error),
        }
    }
}
