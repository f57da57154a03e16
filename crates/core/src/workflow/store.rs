//! The request store collaborator.
//!
//! All request state lives outside this core. The store serializes
//! concurrent decisions on the same request with optimistic concurrency: a
//! save carries the version the caller loaded, and a mismatch is a
//! distinguishable stale-state conflict so the caller can re-fetch and
//! retry. The core never overwrites a newer state.

use thiserror::Error;

use kestrel_shared::RequestId;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::ApprovalRequest;

/// Errors a store implementation may report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No request with this id.
    #[error("Request {0} not found")]
    NotFound(RequestId),

    /// The stored version advanced past the caller's snapshot.
    #[error("Version conflict: expected {expected}, store has {actual}")]
    StaleState {
        /// The version the caller loaded.
        expected: u64,
        /// The version the store currently holds.
        actual: u64,
    },

    /// The store backend failed.
    #[error("Store failure: {0}")]
    Unavailable(String),
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::RequestNotFound(id),
            StoreError::StaleState { expected, actual } => Self::StaleState { expected, actual },
            StoreError::Unavailable(msg) => Self::Store(msg),
        }
    }
}

/// Versioned persistence for approval requests.
pub trait RequestStore {
    /// Loads a request snapshot and its current version.
    fn load(&self, id: RequestId) -> Result<(ApprovalRequest, u64), StoreError>;

    /// Persists a snapshot, guarded by the version the caller loaded.
    ///
    /// Returns the new version on success and
    /// [`StoreError::StaleState`] when the stored version differs from
    /// `expected_version`.
    fn save(&self, request: &ApprovalRequest, expected_version: u64) -> Result<u64, StoreError>;
}
