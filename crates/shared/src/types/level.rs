//! Permission levels and the actions they grant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An abstract action a principal may attempt against a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a record.
    Create,
    /// Read records.
    Read,
    /// Update a record.
    Update,
    /// Delete a record.
    Delete,
    /// Decide a pending approval.
    Approve,
    /// Submit a workflow request.
    Request,
    /// View a page or report.
    View,
}

impl Action {
    /// Every action, for exhaustive table tests.
    pub const ALL: [Action; 7] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Approve,
        Action::Request,
        Action::View,
    ];
}

/// An access tier granted to a role on a module.
///
/// The mapping from level to allowed actions is total and fixed; see
/// [`PermissionLevel::allows`]. `SelfScoped` and `Own` additionally imply
/// record scoping to the acting employee, which is enforced by the caller
/// (the core answers only the unscoped allow/deny).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    /// Every action.
    Full,
    /// Create, read, and update; no delete, no approve.
    Manage,
    /// Read and decide approvals.
    Approve,
    /// Read-only.
    View,
    /// Read and submit workflow requests.
    Request,
    /// Create, read, and update own records.
    #[serde(rename = "self")]
    SelfScoped,
    /// Read own records.
    Own,
}

impl PermissionLevel {
    /// Returns whether this level grants the given action.
    ///
    /// Total and pure: the same `(level, action)` pair always yields the
    /// same answer. `Read` and `View` are granted together at every level;
    /// this is the single place that pairing is encoded.
    #[must_use]
    pub const fn allows(self, action: Action) -> bool {
        match self {
            Self::Full => true,
            Self::Manage | Self::SelfScoped => matches!(
                action,
                Action::Create | Action::Read | Action::Update | Action::View
            ),
            Self::Approve => matches!(action, Action::Read | Action::View | Action::Approve),
            Self::View | Self::Own => matches!(action, Action::Read | Action::View),
            Self::Request => matches!(action, Action::Read | Action::View | Action::Request),
        }
    }

    /// Returns the canonical string representation of the level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Manage => "manage",
            Self::Approve => "approve",
            Self::View => "view",
            Self::Request => "request",
            Self::SelfScoped => "self",
            Self::Own => "own",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
