//! Workflow error types for the approval lifecycle.
//!
//! Every expected business condition is a distinct variant so callers can
//! tell "you are not the next approver" apart from "this was already
//! decided". None of these are silent defaults: a collaborator failure
//! propagates, it never turns into an allow or a deny.

use thiserror::Error;

use kestrel_shared::{EmployeeId, RequestId, Role};

use crate::workflow::types::RequestStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The actor does not satisfy the current level's approver selector.
    #[error("Employee {actor} is not authorized to act at level {level} ({level_name})")]
    Unauthorized {
        /// The employee who attempted the decision.
        actor: EmployeeId,
        /// The chain level the request sits at.
        level: u8,
        /// The name of that level.
        level_name: String,
    },

    /// Operation attempted on a terminal or mismatched state.
    #[error("Invalid transition: request is already {status}")]
    InvalidTransition {
        /// The status that refused the transition.
        status: RequestStatus,
    },

    /// Input validation failed (e.g. a missing rejection reason).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The snapshot is older than what the store holds.
    #[error("Stale state: expected version {expected}, store has {actual}")]
    StaleState {
        /// The version the caller acted on.
        expected: u64,
        /// The version the store currently holds.
        actual: u64,
    },

    /// A role-selector level has no employee to assign.
    #[error("No eligible approver at level {level}: no employee holds role {role}")]
    NoEligibleApprover {
        /// The chain level that could not be resolved.
        level: u8,
        /// The role the level requires.
        role: Role,
    },

    /// The employee directory failed.
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// The request store has no such request.
    #[error("Request {0} not found")]
    RequestNotFound(RequestId),

    /// The request store failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::ValidationFailed(_) => 400,
            Self::Unauthorized { .. } => 403,
            Self::RequestNotFound(_) => 404,
            Self::StaleState { .. } => 409,
            Self::NoEligibleApprover { .. } => 422,
            Self::DirectoryUnavailable(_) | Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::StaleState { .. } => "STALE_STATE",
            Self::NoEligibleApprover { .. } => "NO_ELIGIBLE_APPROVER",
            Self::DirectoryUnavailable(_) => "DIRECTORY_UNAVAILABLE",
            Self::RequestNotFound(_) => "REQUEST_NOT_FOUND",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}
