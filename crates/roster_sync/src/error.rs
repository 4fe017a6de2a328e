//! Error types for the sync repository.

use roster_remote::RemoteError;
use roster_store::{RecordId, StoreError};
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors a mutation can settle with.
///
/// All variants are terminal for the in-flight call; the repository
/// never retries. By the time one of these reaches the caller the
/// local store is back in a consistent state, except for
/// [`SyncError::RollbackFailed`], which reports exactly that the
/// compensating write did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No local row matched the identifier before the optimistic step.
    #[error("no local row with id {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: RecordId,
    },

    /// The mutation is malformed, e.g. an update without an identifier.
    #[error("precondition failed: {message}")]
    PreconditionFailed {
        /// Description of the violated precondition.
        message: String,
    },

    /// The remote service answered with a non-success status.
    #[error("remote rejected the mutation: {message}")]
    RemoteRejected {
        /// Description of the rejection.
        message: String,
    },

    /// The remote service could not be reached.
    #[error("remote unreachable: {message}")]
    RemoteUnreachable {
        /// Description of the connectivity failure.
        message: String,
    },

    /// The local store failed outside a rollback path.
    #[error("local store error: {0}")]
    Store(#[from] StoreError),

    /// A compensating write failed after a remote failure.
    ///
    /// The local store may be inconsistent with both "no mutation
    /// occurred" and "mutation fully occurred"; the host must treat
    /// this as fatal for the mirror.
    #[error("rollback of failed {operation} did not complete: {cause} (after remote failure: {remote})")]
    RollbackFailed {
        /// The mutation whose rollback failed.
        operation: &'static str,
        /// The remote failure that triggered the rollback.
        remote: String,
        /// The store failure that aborted the rollback.
        #[source]
        cause: StoreError,
    },
}

impl SyncError {
    /// Creates a precondition failure.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            message: message.into(),
        }
    }

    /// Returns true when the failure came from the remote round trip.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            SyncError::RemoteRejected { .. } | SyncError::RemoteUnreachable { .. }
        )
    }
}

impl From<RemoteError> for SyncError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Rejected { status, message } => Self::RemoteRejected {
                message: match status {
                    Some(status) => format!("{message} (status {status})"),
                    None => message,
                },
            },
            RemoteError::Unreachable { message } => Self::RemoteUnreachable { message },
        }
    }
}
