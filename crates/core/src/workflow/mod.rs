//! Approval workflow management for Kestrel.
//!
//! This module implements the request lifecycle state machine and the
//! approval chain resolver, plus the collaborator traits for the request
//! store and the employee directory.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (RequestStatus, ApprovalRequest, ...)
//! - `error` - Workflow-specific error types
//! - `directory` - The employee/org directory collaborator
//! - `store` - The versioned request store collaborator
//! - `chain` - Approval chain templates and next-approver resolution
//! - `service` - State transition logic

pub mod chain;
pub mod directory;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod chain_props;
#[cfg(test)]
mod service_props;
#[cfg(test)]
pub(crate) mod testing;

pub use chain::ChainResolver;
pub use directory::{Directory, DirectoryError, ScopeHints};
pub use error::WorkflowError;
pub use service::{ApprovalService, WorkflowEvent};
pub use store::{RequestStore, StoreError};
pub use types::{
    ApprovalLevel, ApprovalRequest, ApproverSelector, AuditNote, RequestStatus, RequestType,
    SubmitterContext,
};
