//! Permission system types and utilities.
//!
//! - Catalog: the closed set of `area.action` permissions
//! - Set: bitflag sets over the catalog
//! - Role: tenant roles and the static role → permission table
//! - Evaluator: has / any / all queries for a resolved role

pub mod catalog;
pub mod evaluator;
pub mod role;
pub mod set;

pub use catalog::Permission;
pub use evaluator::{
    has_all_permissions, has_any_permission, has_permission, missing_permissions,
    require_permission, PermissionError,
};
pub use role::Role;
pub use set::PermissionSet;
