//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for log producers
//! - Driven Ports (outbound) - The downstream sink

pub mod inbound;
pub mod outbound;

pub use inbound::TriggeredBufferApi;
pub use outbound::{LogSink, LogWriter};
