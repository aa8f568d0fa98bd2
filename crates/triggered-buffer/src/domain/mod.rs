//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - The triggered buffer policy (append, release, trim)
//! - Configuration and validation
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No locking

pub mod buffer;
pub mod config;

pub use buffer::{AdmitReport, TriggeredBuffer};
pub use config::{
    BufferConfig, BufferConfigBuilder, BufferSettings, DEFAULT_QUEUE_SIZE, DEFAULT_TRIGGER_LEVEL,
};
