//! Role identities for the organization.
//!
//! Roles arrive from the identity provider in inconsistent casing and
//! formatting (`"ADMIN"`, `"Admin"`, `"hr_manager"`, `"HR Manager"`), so
//! every lookup goes through [`Role::parse`] or [`Role::normalize`] first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A role held by a principal.
///
/// The set is closed: permission tables, route rules, and approval chains
/// are all keyed by these variants, and matches over them are exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unrestricted access to every module and route.
    Admin,
    /// Company-wide oversight and final approvals.
    GeneralManager,
    /// Human resources management.
    HrManager,
    /// Finance and payment processing.
    FinanceManager,
    /// Manages a single project.
    ProjectManager,
    /// Administrative support for a project.
    ProjectSecretary,
    /// Advisory (read-mostly) access to projects.
    ProjectAdvisor,
    /// Oversees the projects of a region.
    RegionalProjectManager,
    /// Warehouse and inventory management.
    WarehouseManager,
    /// Regular employee with self-service access only.
    Employee,
}

impl Role {
    /// Every role, for exhaustive table tests.
    pub const ALL: [Role; 10] = [
        Role::Admin,
        Role::GeneralManager,
        Role::HrManager,
        Role::FinanceManager,
        Role::ProjectManager,
        Role::ProjectSecretary,
        Role::ProjectAdvisor,
        Role::RegionalProjectManager,
        Role::WarehouseManager,
        Role::Employee,
    ];

    /// Parse a role from a string.
    ///
    /// Matching is case-insensitive and ignores separators, so `"ADMIN"`,
    /// `"Admin"`, `"HR Manager"`, `"hr_manager"` and `"HrManager"` all
    /// resolve. Unknown input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "admin" => Some(Self::Admin),
            "generalmanager" => Some(Self::GeneralManager),
            "hrmanager" => Some(Self::HrManager),
            "financemanager" => Some(Self::FinanceManager),
            "projectmanager" => Some(Self::ProjectManager),
            "projectsecretary" => Some(Self::ProjectSecretary),
            "projectadvisor" => Some(Self::ProjectAdvisor),
            "regionalprojectmanager" => Some(Self::RegionalProjectManager),
            "warehousemanager" => Some(Self::WarehouseManager),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Normalize an identity-provider role string, failing closed.
    ///
    /// Unrecognized input coerces to [`Role::Employee`], the least
    /// privileged role. It never coerces to `Admin`.
    #[must_use]
    pub fn normalize(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(input = %s, "unrecognized role, coercing to least privilege");
            Self::Employee
        })
    }

    /// Returns the canonical string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::GeneralManager => "general_manager",
            Self::HrManager => "hr_manager",
            Self::FinanceManager => "finance_manager",
            Self::ProjectManager => "project_manager",
            Self::ProjectSecretary => "project_secretary",
            Self::ProjectAdvisor => "project_advisor",
            Self::RegionalProjectManager => "regional_project_manager",
            Self::WarehouseManager => "warehouse_manager",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
