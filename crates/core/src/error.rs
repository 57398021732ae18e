//! Core Error Types
//!
//! The minimal error set shared across the Taskweave workspace. The engine
//! crate layers its own request-level error type on top of these.

use thiserror::Error;

/// Errors raised by the domain model itself.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A value failed shape or invariant checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON conversion failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
