//! Adapters Layer (Driven Adapters)
//!
//! Concrete implementations of the outbound `LogSink` port.
//!
//! ## Adapters
//!
//! - `InMemorySink` - Collects released events in memory
//! - `TracingSink` - Re-emits released events through `tracing`
//! - `ChannelSink` - Hands events to an async `LogWriter` via a channel

pub mod channel;
pub mod memory;
pub mod tracing_sink;

pub use channel::{forward, ChannelSink, ForwardStats};
pub use memory::InMemorySink;
pub use tracing_sink::TracingSink;
