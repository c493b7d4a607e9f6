//! Permission sets using bitflags.
//!
//! Bits are grouped by resource area:
//! - Agents (bits 0-4)
//! - Conversations (bits 5-8)
//! - Analytics (bits 9-10)
//! - Team (bits 11-13)
//! - Settings (bits 14-15)
//! - Billing (bits 16-17)

use bitflags::bitflags;

use super::catalog::Permission;

bitflags! {
    /// A set of dashboard permissions represented as a 32-bit bitfield.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct PermissionSet: u32 {
        // === Agents (bits 0-4) ===
        const AGENTS_VIEW          = 1 << 0;
        const AGENTS_CREATE        = 1 << 1;
        const AGENTS_EDIT          = 1 << 2;
        const AGENTS_DELETE        = 1 << 3;
        const AGENTS_DEPLOY        = 1 << 4;

        // === Conversations (bits 5-8) ===
        const CONVERSATIONS_VIEW   = 1 << 5;
        const CONVERSATIONS_REPLY  = 1 << 6;
        const CONVERSATIONS_ASSIGN = 1 << 7;
        const CONVERSATIONS_DELETE = 1 << 8;

        // === Analytics (bits 9-10) ===
        const ANALYTICS_VIEW       = 1 << 9;
        const ANALYTICS_EXPORT     = 1 << 10;

        // === Team (bits 11-13) ===
        const TEAM_VIEW            = 1 << 11;
        const TEAM_INVITE          = 1 << 12;
        const TEAM_MANAGE          = 1 << 13;

        // === Settings (bits 14-15) ===
        const SETTINGS_VIEW        = 1 << 14;
        const SETTINGS_MANAGE      = 1 << 15;

        // === Billing (bits 16-17) ===
        const BILLING_VIEW         = 1 << 16;
        const BILLING_MANAGE       = 1 << 17;
    }
}

impl PermissionSet {
    // === Role Grants ===
    //
    // Each tier is listed in full rather than built from the tier below it.

    /// Read-only access to the main dashboard areas.
    pub const VIEWER: Self = Self::AGENTS_VIEW
        .union(Self::CONVERSATIONS_VIEW)
        .union(Self::ANALYTICS_VIEW)
        .union(Self::TEAM_VIEW);

    /// Day-to-day operators: build agents and work conversations.
    pub const MEMBER: Self = Self::AGENTS_VIEW
        .union(Self::AGENTS_CREATE)
        .union(Self::AGENTS_EDIT)
        .union(Self::CONVERSATIONS_VIEW)
        .union(Self::CONVERSATIONS_REPLY)
        .union(Self::CONVERSATIONS_ASSIGN)
        .union(Self::ANALYTICS_VIEW)
        .union(Self::TEAM_VIEW);

    /// Tenant administrators. Everything except changing billing.
    pub const ADMIN: Self = Self::AGENTS_VIEW
        .union(Self::AGENTS_CREATE)
        .union(Self::AGENTS_EDIT)
        .union(Self::AGENTS_DELETE)
        .union(Self::AGENTS_DEPLOY)
        .union(Self::CONVERSATIONS_VIEW)
        .union(Self::CONVERSATIONS_REPLY)
        .union(Self::CONVERSATIONS_ASSIGN)
        .union(Self::CONVERSATIONS_DELETE)
        .union(Self::ANALYTICS_VIEW)
        .union(Self::ANALYTICS_EXPORT)
        .union(Self::TEAM_VIEW)
        .union(Self::TEAM_INVITE)
        .union(Self::TEAM_MANAGE)
        .union(Self::SETTINGS_VIEW)
        .union(Self::SETTINGS_MANAGE)
        .union(Self::BILLING_VIEW);

    /// Tenant owners hold every permission.
    pub const OWNER: Self = Self::all();

    /// Build a set from a list of permissions. Duplicates collapse.
    #[must_use]
    pub fn from_permissions(permissions: &[Permission]) -> Self {
        permissions
            .iter()
            .fold(Self::empty(), |acc, p| acc.union(p.flag()))
    }

    /// Check if this set includes the specified permission.
    #[must_use]
    pub const fn has(self, permission: Permission) -> bool {
        self.contains(permission.flag())
    }

    /// The permissions in this set, in catalog order.
    #[must_use]
    pub fn to_permissions(self) -> Vec<Permission> {
        Permission::all()
            .iter()
            .copied()
            .filter(|p| self.has(*p))
            .collect()
    }
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, p| acc.union(p.flag()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_bit_ranges() {
        assert_eq!(PermissionSet::AGENTS_VIEW.bits(), 1 << 0);
        assert_eq!(PermissionSet::CONVERSATIONS_VIEW.bits(), 1 << 5);
        assert_eq!(PermissionSet::ANALYTICS_VIEW.bits(), 1 << 9);
        assert_eq!(PermissionSet::TEAM_VIEW.bits(), 1 << 11);
        assert_eq!(PermissionSet::SETTINGS_VIEW.bits(), 1 << 14);
        assert_eq!(PermissionSet::BILLING_MANAGE.bits(), 1 << 17);
    }

    #[test]
    fn test_tiers_widen_with_privilege() {
        assert!(PermissionSet::MEMBER.contains(PermissionSet::VIEWER));
        assert!(PermissionSet::ADMIN.contains(PermissionSet::MEMBER));
        assert!(PermissionSet::OWNER.contains(PermissionSet::ADMIN));

        assert_ne!(PermissionSet::MEMBER, PermissionSet::VIEWER);
        assert_ne!(PermissionSet::ADMIN, PermissionSet::MEMBER);
        assert_ne!(PermissionSet::OWNER, PermissionSet::ADMIN);
    }

    #[test]
    fn test_viewer_is_read_only() {
        let viewer = PermissionSet::VIEWER;
        assert!(viewer.has(Permission::AgentsView));
        assert!(viewer.has(Permission::ConversationsView));
        assert!(!viewer.has(Permission::AgentsCreate));
        assert!(!viewer.has(Permission::ConversationsReply));
        assert!(!viewer.has(Permission::SettingsView));
    }

    #[test]
    fn test_admin_cannot_manage_billing() {
        assert!(PermissionSet::ADMIN.has(Permission::BillingView));
        assert!(!PermissionSet::ADMIN.has(Permission::BillingManage));
        assert!(PermissionSet::OWNER.has(Permission::BillingManage));
    }

    #[test]
    fn test_from_permissions_collapses_duplicates() {
        let set = PermissionSet::from_permissions(&[
            Permission::TeamInvite,
            Permission::TeamInvite,
            Permission::TeamManage,
        ]);
        assert_eq!(set, PermissionSet::TEAM_INVITE | PermissionSet::TEAM_MANAGE);
        assert_eq!(set.to_permissions().len(), 2);
    }

    #[test]
    fn test_from_permissions_empty() {
        assert!(PermissionSet::from_permissions(&[]).is_empty());
    }

    #[test]
    fn test_collect_from_iterator() {
        let set: PermissionSet = [Permission::AgentsView, Permission::BillingView]
            .into_iter()
            .collect();
        assert!(set.has(Permission::AgentsView));
        assert!(set.has(Permission::BillingView));
        assert!(!set.has(Permission::AgentsEdit));
    }

    #[test]
    fn test_to_permissions_catalog_order() {
        let set = PermissionSet::BILLING_VIEW | PermissionSet::AGENTS_EDIT;
        assert_eq!(
            set.to_permissions(),
            vec![Permission::AgentsEdit, Permission::BillingView]
        );
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(PermissionSet::default(), PermissionSet::empty());
    }

    // bitflags serde uses human-readable flag names
    #[test]
    fn test_serialize_flag_names() {
        let set = PermissionSet::TEAM_INVITE | PermissionSet::TEAM_MANAGE;
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "\"TEAM_INVITE | TEAM_MANAGE\"");
    }

    #[test]
    fn test_deserialize_flag_names() {
        let set: PermissionSet = serde_json::from_str("\"AGENTS_VIEW | TEAM_VIEW\"").unwrap();
        assert!(set.has(Permission::AgentsView));
        assert!(set.has(Permission::TeamView));
    }
}
