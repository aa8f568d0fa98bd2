//! # Relay Types Crate
//!
//! Log vocabulary shared across the relay.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: levels and events are defined once, here.
//! - **Total Order**: `LogLevel` comparisons are the only severity logic any
//!   stage is allowed to use.
//! - **Move Semantics**: a `LogEvent` has exactly one owner at a time.

pub mod errors;
pub mod event;
pub mod level;

pub use errors::*;
pub use event::LogEvent;
pub use level::LogLevel;
