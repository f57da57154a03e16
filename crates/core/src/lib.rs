//! Authorization and approval-workflow core for Kestrel.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. Persistence and the employee directory are collaborator
//! traits implemented by the hosting application.
//!
//! # Modules
//!
//! - `access` - Role catalog, permission resolution, and route access
//! - `workflow` - Approval chains and the request state machine

pub mod access;
pub mod workflow;
