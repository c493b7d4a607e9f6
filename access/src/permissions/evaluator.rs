//! Permission evaluation.
//!
//! Answers membership queries for a resolved role against the role table.
//! These functions know nothing about loading state; callers that may hold an
//! unresolved context go through [`crate::context::AccessState`], which fails
//! closed.

use thiserror::Error;

use super::catalog::Permission;
use super::role::Role;
use super::set::PermissionSet;

/// Check whether `role` holds `permission`.
#[must_use]
pub const fn has_permission(role: Role, permission: Permission) -> bool {
    role.permissions().has(permission)
}

/// Check whether `role` holds at least one of `permissions`.
///
/// An empty list is never satisfied. A gate with no constraints is a
/// passthrough, but that rule lives in the gate, not here.
///
/// # Examples
///
/// ```
/// use console_access::permissions::{has_any_permission, Permission, Role};
///
/// assert!(has_any_permission(Role::Member, &[Permission::AnalyticsExport, Permission::AgentsEdit]));
/// assert!(!has_any_permission(Role::Owner, &[]));
/// ```
#[must_use]
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    let required = PermissionSet::from_permissions(permissions);
    if required.is_empty() {
        return false;
    }
    role.permissions().intersects(required)
}

/// Check whether `role` holds every one of `permissions`.
///
/// An empty list is vacuously satisfied.
///
/// # Examples
///
/// ```
/// use console_access::permissions::{has_all_permissions, Permission, Role};
///
/// assert!(has_all_permissions(Role::Owner, &[Permission::TeamInvite, Permission::TeamManage]));
/// assert!(has_all_permissions(Role::NoAccess, &[]));
/// ```
#[must_use]
pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    role.permissions()
        .contains(PermissionSet::from_permissions(permissions))
}

/// The subset of `permissions` that `role` does not hold.
#[must_use]
pub fn missing_permissions(role: Role, permissions: &[Permission]) -> PermissionSet {
    PermissionSet::from_permissions(permissions) - role.permissions()
}

/// Require that `role` holds `permission`.
pub const fn require_permission(role: Role, permission: Permission) -> Result<(), PermissionError> {
    if has_permission(role, permission) {
        Ok(())
    } else {
        Err(PermissionError::MissingPermission { role, permission })
    }
}

/// Permission check errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// Role lacks the required permission.
    #[error("Role {role} is missing permission: {permission}")]
    MissingPermission { role: Role, permission: Permission },

    /// Role string is not one of the known roles.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Permission string is not in the catalog.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// The viewer's role has not been resolved yet.
    #[error("Access context is still loading")]
    AccessPending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_permission_matches_table() {
        for role in Role::ALL {
            for perm in Permission::all() {
                assert_eq!(
                    has_permission(role, *perm),
                    role.permissions().to_permissions().contains(perm),
                    "{role} / {perm}"
                );
            }
        }
    }

    #[test]
    fn test_has_all_permissions_empty_is_vacuously_true() {
        for role in Role::ALL {
            assert!(has_all_permissions(role, &[]), "{role}");
        }
    }

    #[test]
    fn test_has_any_permission_empty_is_false() {
        for role in Role::ALL {
            assert!(!has_any_permission(role, &[]), "{role}");
        }
    }

    #[test]
    fn test_has_any_permission_partial_overlap() {
        let required = [Permission::AnalyticsExport, Permission::ConversationsReply];
        assert!(has_any_permission(Role::Member, &required));
        assert!(!has_any_permission(Role::Viewer, &required));
    }

    #[test]
    fn test_has_all_permissions_requires_every_one() {
        let required = [Permission::TeamInvite, Permission::TeamManage];
        assert!(has_all_permissions(Role::Owner, &required));
        assert!(has_all_permissions(Role::Admin, &required));
        assert!(!has_all_permissions(Role::Member, &required));

        let mixed = [Permission::TeamView, Permission::TeamInvite];
        assert!(!has_all_permissions(Role::Viewer, &mixed));
    }

    #[test]
    fn test_duplicates_do_not_change_results() {
        let dup = [Permission::AgentsCreate, Permission::AgentsCreate];
        assert!(has_all_permissions(Role::Member, &dup));
        assert!(!has_any_permission(Role::Viewer, &dup));
    }

    #[test]
    fn test_no_access_denies_everything() {
        for perm in Permission::all() {
            assert!(!has_permission(Role::NoAccess, *perm));
            assert!(!has_any_permission(Role::NoAccess, &[*perm]));
            assert!(!has_all_permissions(Role::NoAccess, &[*perm]));
        }
    }

    #[test]
    fn test_missing_permissions() {
        let required = [
            Permission::AgentsView,
            Permission::AnalyticsExport,
            Permission::BillingManage,
        ];
        let missing = missing_permissions(Role::Member, &required);
        assert_eq!(
            missing.to_permissions(),
            vec![Permission::AnalyticsExport, Permission::BillingManage]
        );
        assert!(missing_permissions(Role::Owner, &required).is_empty());
    }

    #[test]
    fn test_require_permission() {
        assert!(require_permission(Role::Admin, Permission::SettingsManage).is_ok());

        let result = require_permission(Role::Viewer, Permission::AgentsCreate);
        assert_eq!(
            result,
            Err(PermissionError::MissingPermission {
                role: Role::Viewer,
                permission: Permission::AgentsCreate,
            })
        );
    }

    #[test]
    fn test_permission_error_display() {
        let missing = PermissionError::MissingPermission {
            role: Role::Member,
            permission: Permission::AnalyticsExport,
        };
        assert_eq!(
            missing.to_string(),
            "Role member is missing permission: analytics.export"
        );

        let unknown_role = PermissionError::UnknownRole("root".into());
        assert!(unknown_role.to_string().contains("root"));

        let unknown_perm = PermissionError::UnknownPermission("agents.fly".into());
        assert!(unknown_perm.to_string().contains("agents.fly"));

        assert!(PermissionError::AccessPending.to_string().contains("loading"));
    }
}
