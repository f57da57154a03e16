//! Business modules subject to coarse-grained permissioning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named business capability area.
///
/// The set is closed and static; route prefixes and permission tables map
/// onto these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// The landing dashboard.
    Dashboard,
    /// Employee records management.
    Employees,
    /// Payroll calculation, allowances, and deductions.
    Payroll,
    /// Project management.
    Projects,
    /// Warehouse and inventory.
    Warehouse,
    /// Temporary labor requests.
    TempLabor,
    /// Approval workflow inboxes.
    Approvals,
    /// Reporting.
    Reports,
    /// System settings.
    Settings,
    /// Employee self-service.
    SelfService,
}

impl Module {
    /// Every module, for exhaustive table tests.
    pub const ALL: [Module; 10] = [
        Module::Dashboard,
        Module::Employees,
        Module::Payroll,
        Module::Projects,
        Module::Warehouse,
        Module::TempLabor,
        Module::Approvals,
        Module::Reports,
        Module::Settings,
        Module::SelfService,
    ];

    /// Parses a module from its canonical string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dashboard" => Some(Self::Dashboard),
            "employees" => Some(Self::Employees),
            "payroll" => Some(Self::Payroll),
            "projects" => Some(Self::Projects),
            "warehouse" => Some(Self::Warehouse),
            "temp_labor" => Some(Self::TempLabor),
            "approvals" => Some(Self::Approvals),
            "reports" => Some(Self::Reports),
            "settings" => Some(Self::Settings),
            "self_service" => Some(Self::SelfService),
            _ => None,
        }
    }

    /// Returns the canonical string representation of the module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Employees => "employees",
            Self::Payroll => "payroll",
            Self::Projects => "projects",
            Self::Warehouse => "warehouse",
            Self::TempLabor => "temp_labor",
            Self::Approvals => "approvals",
            Self::Reports => "reports",
            Self::Settings => "settings",
            Self::SelfService => "self_service",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
