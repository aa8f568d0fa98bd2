//! # Error Types

use thiserror::Error;

/// Failure to resolve a textual level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelParseError {
    /// The text does not name a known level.
    #[error("Unknown log level: {0:?}")]
    UnknownLevel(String),
}
