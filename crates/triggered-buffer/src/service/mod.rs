//! Service Layer
//!
//! Application service that guards the domain buffer with a lock and wires
//! it to the outbound sink port.

pub mod triggered_buffer_service;

pub use triggered_buffer_service::TriggeredBufferService;
