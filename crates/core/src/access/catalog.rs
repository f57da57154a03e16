//! The role catalog: per-role module permission grants.
//!
//! The catalog is data, not code. The built-in table below is the default
//! deployment catalog; production deployments may replace it wholesale from
//! configuration (see `access::config`).

use std::collections::HashMap;

use serde::Deserialize;

use kestrel_shared::{Module, PermissionLevel, Role};

/// Sparse mapping of `Role -> Module -> PermissionLevel`.
///
/// Absence of a module under a role means "no access". `Admin` is never
/// represented as rows; it is a hard-coded bypass evaluated before any
/// lookup (see `PermissionResolver`).
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RolePermissionTable {
    grants: HashMap<Role, HashMap<Module, PermissionLevel>>,
}

impl RolePermissionTable {
    /// Creates an empty table (every non-admin lookup denies).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Returns the permission level a role holds on a module, if any.
    #[must_use]
    pub fn level_for(&self, role: Role, module: Module) -> Option<PermissionLevel> {
        self.grants.get(&role)?.get(&module).copied()
    }

    /// Returns whether a role has any grant on a module.
    #[must_use]
    pub fn has_module(&self, role: Role, module: Module) -> bool {
        self.level_for(role, module).is_some()
    }

    /// Adds or replaces a single grant. Used by tests and admin tooling.
    pub fn grant(&mut self, role: Role, module: Module, level: PermissionLevel) {
        self.grants.entry(role).or_default().insert(module, level);
    }

    /// Rejects catalogs that carry explicit `Admin` rows.
    ///
    /// Admin is a bypass, not a row; a configured catalog that names it is
    /// almost certainly a mistake and is refused rather than shadowed.
    pub fn validate(&self) -> Result<(), String> {
        if self.grants.contains_key(&Role::Admin) {
            return Err("catalog must not contain explicit admin rows".to_string());
        }
        Ok(())
    }
}

impl Default for RolePermissionTable {
    fn default() -> Self {
        fn row(entries: &[(Module, PermissionLevel)]) -> HashMap<Module, PermissionLevel> {
            entries.iter().copied().collect()
        }

        use Module as M;
        use PermissionLevel as P;

        let mut grants = HashMap::new();
        grants.insert(
            Role::GeneralManager,
            row(&[
                (M::Dashboard, P::View),
                (M::Employees, P::View),
                (M::Payroll, P::Approve),
                (M::Projects, P::Approve),
                (M::Warehouse, P::View),
                (M::TempLabor, P::Approve),
                (M::Approvals, P::Full),
                (M::Reports, P::Full),
                (M::Settings, P::View),
            ]),
        );
        grants.insert(
            Role::HrManager,
            row(&[
                (M::Dashboard, P::View),
                (M::Employees, P::Full),
                (M::Payroll, P::Manage),
                (M::TempLabor, P::Manage),
                (M::Approvals, P::Approve),
                (M::Reports, P::Full),
                (M::SelfService, P::View),
                (M::Settings, P::View),
            ]),
        );
        grants.insert(
            Role::FinanceManager,
            row(&[
                (M::Dashboard, P::View),
                (M::Employees, P::View),
                (M::Payroll, P::Full),
                (M::Projects, P::View),
                (M::Approvals, P::Approve),
                (M::Reports, P::Full),
            ]),
        );
        grants.insert(
            Role::ProjectManager,
            row(&[
                (M::Dashboard, P::View),
                (M::Employees, P::View),
                (M::Projects, P::Manage),
                (M::TempLabor, P::Request),
                (M::Warehouse, P::Request),
                (M::Approvals, P::Approve),
                (M::Reports, P::View),
            ]),
        );
        grants.insert(
            Role::ProjectSecretary,
            row(&[
                (M::Dashboard, P::View),
                (M::Projects, P::Manage),
                (M::TempLabor, P::Request),
                (M::Reports, P::View),
            ]),
        );
        grants.insert(
            Role::ProjectAdvisor,
            row(&[
                (M::Dashboard, P::View),
                (M::Projects, P::View),
                (M::Reports, P::View),
            ]),
        );
        grants.insert(
            Role::RegionalProjectManager,
            row(&[
                (M::Dashboard, P::View),
                (M::Projects, P::Approve),
                (M::TempLabor, P::Approve),
                (M::Warehouse, P::View),
                (M::Reports, P::View),
            ]),
        );
        grants.insert(
            Role::WarehouseManager,
            row(&[
                (M::Dashboard, P::View),
                (M::Projects, P::View),
                (M::Warehouse, P::Full),
                (M::Reports, P::View),
            ]),
        );
        grants.insert(
            Role::Employee,
            row(&[
                (M::Dashboard, P::View),
                (M::SelfService, P::SelfScoped),
                (M::Reports, P::Own),
            ]),
        );

        Self { grants }
    }
}
