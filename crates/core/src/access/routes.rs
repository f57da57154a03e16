//! Route access resolution.
//!
//! Routes are gated two ways: implicitly, by mapping a path prefix to a
//! business module and checking the role's grant on that module, or
//! explicitly, by a per-route role allow-list. Explicit rules strictly
//! dominate the module mapping. The `Employee` role additionally carries
//! its own path policy (management prefixes denied outright, self-service
//! sub-rules).

use std::collections::HashMap;

use serde::Deserialize;

use kestrel_shared::{Action, Module, Role};

use crate::access::catalog::RolePermissionTable;
use crate::access::resolver::PermissionResolver;

/// Per-request facts about the acting employee that route rules consult.
///
/// Only meaningful for the `Employee` role; other roles ignore it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeGate {
    /// Whether the employee is on a techno contract. Self-service routes
    /// other than profile and attendance are gated on this flag.
    pub techno_contract: bool,
}

/// Path policy applied to the `Employee` role when no explicit rule matched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmployeePolicy {
    /// Prefixes denied outright (management surfaces).
    pub denied_prefixes: Vec<String>,
    /// Report routes employees may open (exact match).
    pub report_routes: Vec<String>,
    /// The self-service subtree.
    pub self_service_prefix: String,
    /// Self-service sub-prefixes open to every employee.
    pub open_self_service: Vec<String>,
}

impl Default for EmployeePolicy {
    fn default() -> Self {
        Self {
            denied_prefixes: [
                "/dashboard/employees",
                "/dashboard/payroll/calculation",
                "/dashboard/payroll/approval",
                "/dashboard/payroll/allowances",
                "/dashboard/payroll/deductions",
                "/dashboard/projects",
                "/dashboard/temp-labor",
                "/dashboard/warehouse",
                "/dashboard/settings",
            ]
            .map(String::from)
            .to_vec(),
            report_routes: [
                "/dashboard/reports/attendance",
                "/dashboard/reports/leave-balance",
            ]
            .map(String::from)
            .to_vec(),
            self_service_prefix: "/dashboard/self-service".to_string(),
            open_self_service: [
                "/dashboard/self-service/profile",
                "/dashboard/self-service/attendance",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Route rules: module prefixes, explicit allow-lists, employee policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    /// Longest-prefix mapping from route to module.
    pub modules: Vec<(String, Module)>,
    /// Exact-path allow-lists that dominate the module mapping. An empty
    /// list means admin-only: nobody passes the membership test, and admin
    /// never reaches it.
    pub overrides: HashMap<String, Vec<Role>>,
    /// The employee path policy.
    pub employee: EmployeePolicy,
}

impl Default for RouteTable {
    fn default() -> Self {
        let modules = [
            ("/dashboard/employees", Module::Employees),
            ("/dashboard/payroll", Module::Payroll),
            ("/dashboard/projects", Module::Projects),
            ("/dashboard/warehouse", Module::Warehouse),
            ("/dashboard/temp-labor", Module::TempLabor),
            ("/dashboard/approvals", Module::Approvals),
            ("/dashboard/reports", Module::Reports),
            ("/dashboard/settings", Module::Settings),
            ("/dashboard/self-service", Module::SelfService),
            ("/dashboard", Module::Dashboard),
        ]
        .map(|(p, m)| (p.to_string(), m))
        .to_vec();

        let mut overrides = HashMap::new();
        overrides.insert(
            "/dashboard/payroll/approval".to_string(),
            vec![Role::GeneralManager, Role::FinanceManager],
        );
        overrides.insert(
            "/dashboard/temp-labor/approval".to_string(),
            vec![Role::RegionalProjectManager, Role::HrManager],
        );
        // Admin-only: the empty allow-list admits nobody, and admin short-circuits earlier.
        overrides.insert("/dashboard/settings/roles".to_string(), Vec::new());

        Self {
            modules,
            overrides,
            employee: EmployeePolicy::default(),
        }
    }
}

impl RouteTable {
    /// Resolves a route to its module by longest matching prefix.
    #[must_use]
    pub fn module_for(&self, route: &str) -> Option<Module> {
        self.modules
            .iter()
            .filter(|(prefix, _)| has_prefix(route, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, module)| *module)
    }
}

/// Stateless engine answering "may this role open this route".
pub struct RouteAuthority;

impl RouteAuthority {
    /// Returns whether `role` may access `route`.
    ///
    /// Evaluation is strictly ordered; the first matching stage is
    /// terminal. Absence of any matching rule is a deny, never an error,
    /// and the check is idempotent so callers may run it on every
    /// navigation.
    #[must_use]
    pub fn can_access(
        routes: &RouteTable,
        catalog: &RolePermissionTable,
        role: Role,
        route: &str,
        gate: EmployeeGate,
    ) -> bool {
        let route = normalize(route);
        let route = route.as_str();

        // 1. Admin bypass.
        if role == Role::Admin {
            return true;
        }

        // 2. Explicit allow-list, terminal even when the module mapping
        //    would disagree.
        if let Some(allowed) = routes.overrides.get(route) {
            let hit = allowed.contains(&role);
            tracing::debug!(%role, route, allowed = hit, "explicit route rule");
            return hit;
        }

        // 3. Employee path policy, terminal for the Employee role.
        if role == Role::Employee {
            return Self::employee_can_access(&routes.employee, route, gate);
        }

        // 4. Module-derived resolution.
        match routes.module_for(route) {
            Some(module) => {
                let hit = PermissionResolver::can_perform(catalog, role, module, Action::Read);
                if !hit {
                    tracing::debug!(%role, route, %module, "route denied by module grant");
                }
                hit
            }
            // Unmapped routes: only the dashboard root and the
            // self-service subtree are reachable.
            None => route == "/dashboard" || has_prefix(route, &routes.employee.self_service_prefix),
        }
    }

    fn employee_can_access(policy: &EmployeePolicy, route: &str, gate: EmployeeGate) -> bool {
        if policy
            .denied_prefixes
            .iter()
            .any(|prefix| has_prefix(route, prefix))
        {
            tracing::debug!(route, "employee route denied by management prefix");
            return false;
        }

        if route == "/dashboard" {
            return true;
        }

        if policy.report_routes.iter().any(|r| r == route) {
            return true;
        }

        if has_prefix(route, &policy.self_service_prefix) {
            if policy
                .open_self_service
                .iter()
                .any(|prefix| has_prefix(route, prefix))
            {
                return true;
            }
            // Remaining self-service surfaces are contract-gated.
            return gate.techno_contract;
        }

        false
    }
}

/// Trims query/fragment and the trailing slash; an empty path becomes `/`.
fn normalize(route: &str) -> String {
    let path = route
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Prefix match on path-segment boundaries: `/dashboard/pay` does not
/// match the `/dashboard/payroll` subtree.
fn has_prefix(route: &str, prefix: &str) -> bool {
    route == prefix
        || route
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}
