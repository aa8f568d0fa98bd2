//! # Log Relay Test Suite
//!
//! Unified test crate for behavior that spans crates or threads.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── concurrency.rs   # Many admitters, one buffer
//!     └── pipeline.rs      # Buffer -> sink adapters -> async writers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p relay-tests
//! cargo test -p relay-tests integration::concurrency::
//! ```

#![allow(dead_code)]

pub mod integration;
