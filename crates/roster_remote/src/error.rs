//! Error types for the remote boundary.

use thiserror::Error;

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur when talking to the remote service.
///
/// The taxonomy is intentionally coarse: the sync layer only needs to
/// distinguish "the service answered and said no" from "the service
/// could not be reached". Neither is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The service answered with a non-success status.
    #[error("remote rejected the request: {message}")]
    Rejected {
        /// HTTP-level status when one was received.
        status: Option<u16>,
        /// Description of the rejection.
        message: String,
    },

    /// The service could not be reached (network or timeout class).
    #[error("remote unreachable: {message}")]
    Unreachable {
        /// Description of the connectivity failure.
        message: String,
    },
}

impl RemoteError {
    /// Creates a rejection without a status code.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a rejection carrying the received status code.
    pub fn rejected_status(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a connectivity failure.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Returns true for network/timeout-class failures.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, RemoteError::Unreachable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_classification() {
        assert!(RemoteError::unreachable("connection reset").is_connectivity());
        assert!(!RemoteError::rejected("validation failed").is_connectivity());
        assert!(!RemoteError::rejected_status(500, "boom").is_connectivity());
    }

    #[test]
    fn error_display() {
        let err = RemoteError::rejected_status(422, "salary out of range");
        assert!(err.to_string().contains("salary out of range"));

        let err = RemoteError::unreachable("timed out");
        assert!(err.to_string().contains("timed out"));
    }
}
