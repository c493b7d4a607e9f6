//! Evaluation context: the viewer's role in the current tenant.
//!
//! The state is published through a `watch` channel. Every update replaces
//! the whole value, and a render pass reads one snapshot up front, so a
//! permission check never sees a role that is half-way through changing.

use std::future::Future;

use console_common::Membership;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use crate::permissions::{self, Permission, PermissionError, Role};

/// Access state for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccessState {
    /// No session. Evaluates as [`Role::NoAccess`].
    #[default]
    SignedOut,
    /// A tenant session is being established; no decision is final.
    Loading { user_id: Uuid, tenant_id: Uuid },
    /// Role resolved for one tenant.
    Ready {
        user_id: Uuid,
        tenant_id: Uuid,
        role: Role,
    },
}

impl AccessState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// The resolved role, or `None` while loading or signed out.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Ready { role, .. } => Some(*role),
            Self::SignedOut | Self::Loading { .. } => None,
        }
    }

    /// The role checks should run against once loading is over.
    ///
    /// Signed-out sessions evaluate as [`Role::NoAccess`].
    #[must_use]
    pub fn effective_role(&self) -> Role {
        self.role().unwrap_or(Role::NoAccess)
    }

    #[must_use]
    pub const fn tenant_id(&self) -> Option<Uuid> {
        match self {
            Self::Loading { tenant_id, .. } | Self::Ready { tenant_id, .. } => Some(*tenant_id),
            Self::SignedOut => None,
        }
    }

    /// Check a single permission. Always false while loading.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        if self.is_loading() {
            return false;
        }
        permissions::has_permission(self.effective_role(), permission)
    }

    /// Check for at least one permission. Always false while loading.
    #[must_use]
    pub fn has_any_permission(&self, required: &[Permission]) -> bool {
        if self.is_loading() {
            return false;
        }
        permissions::has_any_permission(self.effective_role(), required)
    }

    /// Check for every permission. Always false while loading, even for an
    /// empty list.
    #[must_use]
    pub fn has_all_permissions(&self, required: &[Permission]) -> bool {
        if self.is_loading() {
            return false;
        }
        permissions::has_all_permissions(self.effective_role(), required)
    }

    /// Require a permission, distinguishing "not yet known" from "denied".
    pub fn require_permission(&self, permission: Permission) -> Result<(), PermissionError> {
        if self.is_loading() {
            return Err(PermissionError::AccessPending);
        }
        permissions::require_permission(self.effective_role(), permission)
    }
}

/// Backend lookup for a user's membership in a tenant.
///
/// Returns `Ok(None)` when the user is not a member of the tenant.
pub trait MembershipSource {
    fn fetch_membership(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> impl Future<Output = console_common::Result<Option<Membership>>> + Send;
}

/// Shared, swappable access state.
#[derive(Debug)]
pub struct AccessContext {
    tx: watch::Sender<AccessState>,
}

impl AccessContext {
    /// Create a signed-out context.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AccessState::SignedOut);
        Self { tx }
    }

    /// Copy of the current state. Take one per render pass.
    #[must_use]
    pub fn snapshot(&self) -> AccessState {
        *self.tx.borrow()
    }

    /// Receiver that is notified whenever the state is replaced.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AccessState> {
        self.tx.subscribe()
    }

    /// Start establishing a session for `user_id` in `tenant_id`.
    ///
    /// Switching tenants always goes back through loading.
    pub fn begin(&self, user_id: Uuid, tenant_id: Uuid) {
        debug!(%user_id, %tenant_id, "Access context loading");
        self.tx.send_replace(AccessState::Loading { user_id, tenant_id });
    }

    /// Publish the resolved role.
    ///
    /// Applied only while the context is still loading for the same user and
    /// tenant. Returns `false` when the resolution is stale and was dropped.
    pub fn resolve(&self, user_id: Uuid, tenant_id: Uuid, role: Role) -> bool {
        let applied = self.tx.send_if_modified(|state| match *state {
            AccessState::Loading {
                user_id: u,
                tenant_id: t,
            } if u == user_id && t == tenant_id => {
                *state = AccessState::Ready {
                    user_id,
                    tenant_id,
                    role,
                };
                true
            }
            _ => false,
        });

        if applied {
            info!(%user_id, %tenant_id, %role, "Access context ready");
        } else {
            debug!(%user_id, %tenant_id, %role, "Dropping stale role resolution");
        }
        applied
    }

    /// Drop the session (logout).
    pub fn clear(&self) {
        debug!("Access context cleared");
        self.tx.send_replace(AccessState::SignedOut);
    }

    /// Establish a session by looking up the user's membership.
    ///
    /// A missing membership resolves to [`Role::NoAccess`]. A lookup failure
    /// also resolves to [`Role::NoAccess`] and is returned to the caller.
    #[tracing::instrument(skip(self, source))]
    pub async fn load<S>(
        &self,
        source: &S,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> console_common::Result<Role>
    where
        S: MembershipSource + Sync,
    {
        self.begin(user_id, tenant_id);

        match source.fetch_membership(user_id, tenant_id).await {
            Ok(membership) => {
                let role = membership.map_or(Role::NoAccess, |m| Role::resolve(&m.role));
                self.resolve(user_id, tenant_id, role);
                Ok(role)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Membership lookup failed, denying access");
                self.resolve(user_id, tenant_id, Role::NoAccess);
                Err(e)
            }
        }
    }
}

impl Default for AccessContext {
    fn default() -> Self {
        Self::new()
    }
}
