//! Error types for the local store.

use crate::record::RecordId;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in local store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The operation requires an identifier and the record has none.
    #[error("record has no identifier")]
    MissingId,

    /// No row matched the identifier.
    #[error("no row with id {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: RecordId,
    },

    /// The underlying storage rejected the operation.
    #[error("storage backend error: {message}")]
    Backend {
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            StoreError::NotFound { id: 3 }.to_string(),
            "no row with id 3"
        );
        assert_eq!(
            StoreError::MissingId.to_string(),
            "record has no identifier"
        );
        assert!(StoreError::backend("disk full")
            .to_string()
            .contains("disk full"));
    }
}
