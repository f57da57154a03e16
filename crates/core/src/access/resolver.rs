//! Permission resolution: may this role perform this action on this module?

use kestrel_shared::{Action, Module, Role};

use crate::access::catalog::RolePermissionTable;

/// Stateless engine answering module-level permission questions.
///
/// Resolution is total and side-effect-free: unknown combinations are
/// denials, never errors, which keeps the engine exhaustively
/// table-testable.
pub struct PermissionResolver;

impl PermissionResolver {
    /// Returns whether `role` may perform `action` on `module`.
    ///
    /// Evaluation order:
    /// 1. `Admin` is allowed unconditionally.
    /// 2. A missing `(role, module)` grant denies (fail closed).
    /// 3. Otherwise the grant's permission level decides.
    #[must_use]
    pub fn can_perform(
        table: &RolePermissionTable,
        role: Role,
        module: Module,
        action: Action,
    ) -> bool {
        if role == Role::Admin {
            return true;
        }
        table
            .level_for(role, module)
            .is_some_and(|level| level.allows(action))
    }
}
