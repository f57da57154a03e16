//! Role-based access control for Kestrel.
//!
//! This module implements the permission catalog, module-level permission
//! resolution, and route access rules.
//!
//! # Modules
//!
//! - `catalog` - The role -> module -> permission-level table
//! - `resolver` - Module-level allow/deny decisions
//! - `routes` - Route access rules and the employee path policy
//! - `config` - Loading table overrides from configuration

pub mod catalog;
pub mod config;
pub mod resolver;
pub mod routes;

#[cfg(test)]
mod access_props;

pub use catalog::RolePermissionTable;
pub use config::AccessTables;
pub use resolver::PermissionResolver;
pub use routes::{EmployeeGate, EmployeePolicy, RouteAuthority, RouteTable};
