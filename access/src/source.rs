//! Membership rows exported from the backend as JSON lines.
//!
//! One `Membership` object per line. Used by the CLI to resolve a user's
//! access from a backend export without a live connection.

use std::collections::HashMap;

use console_common::{Error, Membership};
use uuid::Uuid;

use crate::context::MembershipSource;

/// In-memory membership table decoded from JSON lines.
#[derive(Debug, Clone, Default)]
pub struct JsonMemberships {
    rows: HashMap<(Uuid, Uuid), Membership>,
}

impl JsonMemberships {
    /// Decode every non-blank line as a membership row.
    ///
    /// Fails on the first undecodable line, reporting its 1-based number.
    /// A later row for the same user and tenant replaces an earlier one.
    pub fn from_json_lines(raw: &str) -> console_common::Result<Self> {
        let mut rows = HashMap::new();

        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let membership = Membership::from_json(line).map_err(|e| match e {
                Error::Malformed(msg) => Error::Malformed(format!("line {}: {msg}", idx + 1)),
                other => Error::Malformed(format!("line {}: {other}", idx + 1)),
            })?;
            rows.insert((membership.user_id, membership.tenant_id), membership);
        }

        Ok(Self { rows })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, user_id: Uuid, tenant_id: Uuid) -> Option<&Membership> {
        self.rows.get(&(user_id, tenant_id))
    }
}

impl MembershipSource for JsonMemberships {
    async fn fetch_membership(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> console_common::Result<Option<Membership>> {
        Ok(self.get(user_id, tenant_id).cloned())
    }
}
