//! Shared types and errors for Kestrel.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The role, module, and permission-level vocabulary
//! - Application-wide error types

pub mod error;
pub mod types;

pub use error::{AppError, AppResult};
pub use types::{Action, EmployeeId, Module, PermissionLevel, RequestId, Role};
