//! Error types for nikki-core

use thiserror::Error;

/// Failure of a generation operation.
///
/// The message is surfaced verbatim to callers, so it carries no prefix of
/// its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Live generation was requested but its preconditions are unmet.
    #[error("{0}")]
    Unavailable(String),

    /// The remote call failed or returned something unusable.
    #[error("{0}")]
    Call(String),
}

impl GenerationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn call(message: impl Into<String>) -> Self {
        Self::Call(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
