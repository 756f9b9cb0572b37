//! Domain-level errors.
//!
//! These errors represent business rule violations that are independent of
//! infrastructure concerns (HTTP, database). Field-level validation failures
//! are not errors here; they are reported as [`crate::Violation`] lists.

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Page index or page size out of range
    #[error("Invalid pagination: {0}")]
    InvalidPage(String),

    /// Unrecognised validation policy name
    #[error("Unknown validation policy: {0}")]
    UnknownPolicy(String),
}

impl DomainError {
    /// Create an invalid pagination error
    pub fn invalid_page(msg: impl Into<String>) -> Self {
        DomainError::InvalidPage(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
