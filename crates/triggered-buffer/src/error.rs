//! Error types for the triggered buffer

use relay_types::LevelParseError;
use thiserror::Error;

/// Errors surfaced by the triggered buffer.
///
/// Only setup can fail. Admission has no failure path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Why a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("queue size must be >= 0, got {value}")]
    NegativeQueueSize { value: i64 },

    #[error("queue size {value} does not fit this platform's address space")]
    QueueSizeOutOfRange { value: i64 },

    #[error("queue size is not an integer: {raw:?}")]
    UnparseableQueueSize { raw: String },

    #[error("trigger level: {0}")]
    UnknownTriggerLevel(#[from] LevelParseError),
}

impl From<LevelParseError> for BufferError {
    fn from(err: LevelParseError) -> Self {
        BufferError::InvalidConfiguration(ConfigError::UnknownTriggerLevel(err))
    }
}

/// Errors from downstream log writers.
///
/// These never reach the caller of `admit`; adapters log and drop them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("Sink closed")]
    Closed,

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
