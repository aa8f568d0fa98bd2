//! Buffer configuration and validation
//!
//! `BufferConfig` is the raw, host-facing form: what a config file or the
//! environment supplies. `BufferSettings` is the validated, typed form the
//! buffer actually runs with. The trigger level is parsed exactly once, in
//! [`BufferConfig::validate`].
//!
//! # Example
//!
//! ```ignore
//! use triggered_buffer::domain::BufferConfigBuilder;
//!
//! let settings = BufferConfigBuilder::new()
//!     .queue_size(50)
//!     .trigger_level("Warn")
//!     .build()
//!     .expect("Valid config");
//! ```

use relay_types::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{BufferError, ConfigError};

/// Default maximum number of retained events.
pub const DEFAULT_QUEUE_SIZE: i64 = 100;

/// Default trigger level name.
pub const DEFAULT_TRIGGER_LEVEL: &str = "Error";

/// Environment variable holding the queue size.
pub const ENV_QUEUE_SIZE: &str = "RELAY_QUEUE_SIZE";

/// Environment variable holding the trigger level name.
pub const ENV_TRIGGER_LEVEL: &str = "RELAY_TRIGGER_LEVEL";

/// Raw buffer configuration as supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Maximum retained events. Signed so that a negative value from a
    /// config source can be reported instead of wrapping.
    pub queue_size: i64,
    /// Name of the level at or above which the buffer is released.
    pub trigger_level: String,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            queue_size: DEFAULT_QUEUE_SIZE,
            trigger_level: DEFAULT_TRIGGER_LEVEL.to_string(),
        }
    }
}

/// Validated buffer settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferSettings {
    /// Maximum retained events after each admission.
    pub queue_size: usize,
    /// Events at or above this level release the buffer.
    pub trigger_level: LogLevel,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            queue_size: DEFAULT_QUEUE_SIZE as usize,
            trigger_level: LogLevel::Error,
        }
    }
}

impl BufferConfig {
    /// Create a configuration. Not validated until [`validate`](Self::validate).
    pub fn new(queue_size: i64, trigger_level: impl Into<String>) -> Self {
        Self {
            queue_size,
            trigger_level: trigger_level.into(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RELAY_QUEUE_SIZE`: Maximum retained events (default: 100)
    /// - `RELAY_TRIGGER_LEVEL`: Trigger level name (default: Error)
    ///
    /// A queue size that is present but not an integer is an error, never a
    /// silent fallback to the default.
    pub fn from_env() -> Result<Self, BufferError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BufferError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let queue_size = match lookup(ENV_QUEUE_SIZE) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::UnparseableQueueSize { raw })?,
            None => DEFAULT_QUEUE_SIZE,
        };

        let trigger_level =
            lookup(ENV_TRIGGER_LEVEL).unwrap_or_else(|| DEFAULT_TRIGGER_LEVEL.to_string());

        Ok(Self {
            queue_size,
            trigger_level,
        })
    }

    /// Validate and resolve into typed settings.
    pub fn validate(&self) -> Result<BufferSettings, BufferError> {
        if self.queue_size < 0 {
            return Err(ConfigError::NegativeQueueSize {
                value: self.queue_size,
            }
            .into());
        }
        let queue_size =
            usize::try_from(self.queue_size).map_err(|_| ConfigError::QueueSizeOutOfRange {
                value: self.queue_size,
            })?;

        let trigger_level = LogLevel::from_name(&self.trigger_level)?;

        Ok(BufferSettings {
            queue_size,
            trigger_level,
        })
    }

    /// Builder-style method to set the queue size
    pub fn with_queue_size(mut self, queue_size: i64) -> Self {
        self.queue_size = queue_size;
        self
    }

    /// Builder-style method to set the trigger level
    pub fn with_trigger_level(mut self, level: impl Into<String>) -> Self {
        self.trigger_level = level.into();
        self
    }
}

/// Builder for [`BufferSettings`] with validation.
#[derive(Default)]
pub struct BufferConfigBuilder {
    queue_size: Option<i64>,
    trigger_level: Option<String>,
}

impl BufferConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of retained events (must be >= 0)
    pub fn queue_size(mut self, queue_size: i64) -> Self {
        self.queue_size = Some(queue_size);
        self
    }

    /// Set the trigger level by name
    pub fn trigger_level(mut self, level: impl Into<String>) -> Self {
        self.trigger_level = Some(level.into());
        self
    }

    /// Raw configuration, defaults filled in, not validated.
    pub fn into_config(self) -> BufferConfig {
        let defaults = BufferConfig::default();
        BufferConfig {
            queue_size: self.queue_size.unwrap_or(defaults.queue_size),
            trigger_level: self.trigger_level.unwrap_or(defaults.trigger_level),
        }
    }

    /// Build validated settings.
    pub fn build(self) -> Result<BufferSettings, BufferError> {
        self.into_config().validate()
    }
}
