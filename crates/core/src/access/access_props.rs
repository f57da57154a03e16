//! Property-based tests for the access engines.
//!
//! These tests validate the determinism and dominance properties of
//! permission and route resolution.

use proptest::prelude::*;

use kestrel_shared::{Action, Module, Role};

use crate::access::catalog::RolePermissionTable;
use crate::access::resolver::PermissionResolver;
use crate::access::routes::{EmployeeGate, RouteAuthority, RouteTable};

/// Strategy for generating random roles.
fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

/// Strategy for generating random modules.
fn arb_module() -> impl Strategy<Value = Module> {
    prop::sample::select(Module::ALL.to_vec())
}

/// Strategy for generating random actions.
fn arb_action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

/// Strategy for generating dashboard-ish route paths.
fn arb_route() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/dashboard".to_string()),
        prop::sample::select(vec![
            "employees",
            "payroll",
            "payroll/approval",
            "projects",
            "warehouse/items",
            "temp-labor",
            "reports/attendance",
            "settings/roles",
            "self-service/profile",
            "self-service/loans",
        ])
        .prop_map(|tail| format!("/dashboard/{tail}")),
        "[a-z]{1,8}/[a-z]{1,8}".prop_map(|tail| format!("/{tail}")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Rebuilding the tables and replaying the same input always yields
    /// the same boolean.
    #[test]
    fn prop_can_perform_is_deterministic(
        role in arb_role(),
        module in arb_module(),
        action in arb_action(),
    ) {
        let first = PermissionResolver::can_perform(
            &RolePermissionTable::default(), role, module, action);
        let second = PermissionResolver::can_perform(
            &RolePermissionTable::default(), role, module, action);
        prop_assert_eq!(first, second);
    }

    /// Admin is allowed every action on every module.
    #[test]
    fn prop_admin_always_allowed(
        module in arb_module(),
        action in arb_action(),
    ) {
        let table = RolePermissionTable::default();
        prop_assert!(PermissionResolver::can_perform(&table, Role::Admin, module, action));
    }

    /// A role without a module grant is denied every action on it.
    #[test]
    fn prop_missing_grant_denies_all_actions(
        role in arb_role(),
        module in arb_module(),
        action in arb_action(),
    ) {
        let table = RolePermissionTable::default();
        prop_assume!(role != Role::Admin);
        prop_assume!(!table.has_module(role, module));
        prop_assert!(!PermissionResolver::can_perform(&table, role, module, action));
    }

    /// An explicit allow-list is terminal: the module-derived answer never
    /// shows through, whichever way they disagree.
    #[test]
    fn prop_override_dominates_module_rule(
        role in arb_role(),
        listed in any::<bool>(),
    ) {
        prop_assume!(role != Role::Admin);

        let catalog = RolePermissionTable::default();
        let mut routes = RouteTable::default();
        let route = "/dashboard/reports/export";
        let allowed = if listed { vec![role] } else { Vec::new() };
        routes.overrides.insert(route.to_string(), allowed);

        let verdict = RouteAuthority::can_access(
            &routes, &catalog, role, route, EmployeeGate::default());
        prop_assert_eq!(verdict, listed);
    }

    /// Route resolution is pure: the same inputs always agree, and no
    /// input panics.
    #[test]
    fn prop_route_access_is_total_and_deterministic(
        role in arb_role(),
        route in arb_route(),
        techno in any::<bool>(),
    ) {
        let catalog = RolePermissionTable::default();
        let routes = RouteTable::default();
        let gate = EmployeeGate { techno_contract: techno };
        let first = RouteAuthority::can_access(&routes, &catalog, role, &route, gate);
        let second = RouteAuthority::can_access(&routes, &catalog, role, &route, gate);
        prop_assert_eq!(first, second);
    }

    /// Employees never reach management subtrees, whatever their contract.
    #[test]
    fn prop_employee_never_reaches_management_prefixes(
        techno in any::<bool>(),
        tail in "[a-z]{1,10}",
    ) {
        let catalog = RolePermissionTable::default();
        let routes = RouteTable::default();
        for prefix in ["/dashboard/employees", "/dashboard/warehouse", "/dashboard/projects"] {
            let route = format!("{prefix}/{tail}");
            let denied = !RouteAuthority::can_access(
                &routes,
                &catalog,
                Role::Employee,
                &route,
                EmployeeGate { techno_contract: techno },
            );
            prop_assert!(denied);
        }
    }
}
