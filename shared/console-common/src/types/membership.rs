//! Tenant Membership Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A user's membership in a tenant, as stored by the backend.
///
/// `role` is kept as the raw string the backend returned. It is only turned
/// into a typed role by the access layer, which decides how unknown values
/// are handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Member user ID.
    pub user_id: Uuid,
    /// Tenant (organization) ID.
    pub tenant_id: Uuid,
    /// Raw role name.
    pub role: String,
    /// When the user joined the tenant.
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl Membership {
    /// Create a membership record with no join timestamp.
    pub fn new(user_id: Uuid, tenant_id: Uuid, role: impl Into<String>) -> Self {
        Self {
            user_id,
            tenant_id,
            role: role.into(),
            joined_at: None,
        }
    }

    /// Decode a membership row from the backend's JSON representation.
    pub fn from_json(raw: &str) -> Result<Self> {
        let membership: Self = serde_json::from_str(raw)?;
        if membership.role.trim().is_empty() {
            return Err(Error::Malformed("membership role is empty".into()));
        }
        Ok(membership)
    }
}
