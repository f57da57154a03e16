//! The employee/org directory collaborator.
//!
//! The directory is owned by the hosting application; the workflow core
//! only consumes it. Calls are synchronous by contract, and a failure is
//! always propagated as an error, never treated as an allow or a deny.

use thiserror::Error;

use kestrel_shared::{EmployeeId, Role};

use crate::workflow::error::WorkflowError;
use crate::workflow::types::SubmitterContext;

/// Errors a directory implementation may report.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory has no such employee.
    #[error("Unknown employee {0}")]
    UnknownEmployee(EmployeeId),

    /// The directory backend failed.
    #[error("Directory failure: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for WorkflowError {
    fn from(err: DirectoryError) -> Self {
        Self::DirectoryUnavailable(err.to_string())
    }
}

/// Narrowing hints for role-holder resolution.
///
/// A "Regional Project Manager" level, for example, should resolve within
/// the submitter's project rather than company-wide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeHints {
    /// Restrict to holders responsible for this department.
    pub department: Option<String>,
    /// Restrict to holders responsible for this project.
    pub project: Option<String>,
}

impl From<&SubmitterContext> for ScopeHints {
    fn from(ctx: &SubmitterContext) -> Self {
        Self {
            department: ctx.department.clone(),
            project: ctx.project.clone(),
        }
    }
}

/// Read access to the employee/org directory.
///
/// Implementations MUST return normalized [`Role`] values; the core never
/// sees raw identity-provider strings.
pub trait Directory {
    /// Returns the role the employee currently holds.
    fn role_of(&self, employee: EmployeeId) -> Result<Role, DirectoryError>;

    /// Returns the employees currently holding `role`, narrowed by
    /// `hints`. Order must be stable so routing hints are deterministic.
    fn employees_with_role(
        &self,
        role: Role,
        hints: &ScopeHints,
    ) -> Result<Vec<EmployeeId>, DirectoryError>;

    /// Returns the employee's direct manager, if any.
    fn manager_of(&self, employee: EmployeeId) -> Result<Option<EmployeeId>, DirectoryError>;
}
