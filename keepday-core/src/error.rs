//! Error types for the keepday ecosystem.

use thiserror::Error;

/// Errors that can occur in keepday operations.
#[derive(Error, Debug)]
pub enum KeepdayError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Malformed event record: {0}")]
    Record(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl KeepdayError {
    /// Whether this error was detected client-side, before any request
    /// was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            KeepdayError::MissingField(_) | KeepdayError::InvalidDate(_)
        )
    }
}

/// Result type alias for keepday operations.
pub type KeepdayResult<T> = Result<T, KeepdayError>;
