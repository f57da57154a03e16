//! Common types used across the application.

pub mod id;
pub mod level;
pub mod module;
pub mod role;

pub use id::*;
pub use level::{Action, PermissionLevel};
pub use module::Module;
pub use role::Role;
