//! Tenant roles and the role → permission table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::evaluator::PermissionError;
use super::set::PermissionSet;

/// A user's role inside one tenant.
///
/// The four tiers are ordered by how much they can do, but nothing here
/// compares them numerically: each tier's grants are declared on their own in
/// [`Role::permissions`]. `NoAccess` is not a tier; it is what role strings
/// the access layer cannot recognise resolve to.
///
/// Deserialization is lenient and goes through [`Role::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Role {
    Owner,
    Admin,
    Member,
    Viewer,
    NoAccess,
}

impl Role {
    /// The four assignable tiers, broadest first.
    pub const TIERS: [Self; 4] = [Self::Owner, Self::Admin, Self::Member, Self::Viewer];

    /// Every role value, including `NoAccess`.
    pub const ALL: [Self; 5] = [
        Self::Owner,
        Self::Admin,
        Self::Member,
        Self::Viewer,
        Self::NoAccess,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
            Self::NoAccess => "no_access",
        }
    }

    /// The permissions this role holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_access::permissions::{Permission, Role};
    ///
    /// assert!(Role::Owner.permissions().has(Permission::TeamManage));
    /// assert!(Role::NoAccess.permissions().is_empty());
    /// ```
    #[must_use]
    pub const fn permissions(self) -> PermissionSet {
        match self {
            Self::Owner => PermissionSet::OWNER,
            Self::Admin => PermissionSet::ADMIN,
            Self::Member => PermissionSet::MEMBER,
            Self::Viewer => PermissionSet::VIEWER,
            Self::NoAccess => PermissionSet::empty(),
        }
    }

    /// Resolve a role string from external data.
    ///
    /// Unknown values resolve to [`Role::NoAccess`] so downstream checks
    /// deny instead of erroring.
    pub fn resolve(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(role = raw, "Unknown role, resolving to no_access");
            Self::NoAccess
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PermissionError;

    /// Strict parse. Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| PermissionError::UnknownRole(name.to_owned()))
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Self::resolve(&raw)
    }
}
