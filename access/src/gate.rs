//! Permission gate.
//!
//! Decides which branch of a UI subtree is shown for the current access
//! state: the protected children, a caller-supplied fallback, or the
//! built-in access denied panel. While the context is loading nothing is
//! shown at all.

use serde::Serialize;
use tracing::debug;

use crate::context::AccessState;
use crate::permissions::{self, Permission, PermissionSet, Role};

/// Outcome of evaluating a gate against one access snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// Role not resolved yet. Not a grant and not a denial.
    Pending,
    Grant,
    Deny,
}

/// Evaluate the gate rules for `required` against `state`.
///
/// Resolution order:
/// 1. Loading → `Pending`
/// 2. `require_all` → every permission must be held (empty list passes)
/// 3. Non-empty list → at least one must be held
/// 4. No constraints → `Grant`
#[must_use]
pub fn evaluate(state: &AccessState, required: &[Permission], require_all: bool) -> GateDecision {
    if state.is_loading() {
        return GateDecision::Pending;
    }

    let role = state.effective_role();
    let granted = if require_all {
        permissions::has_all_permissions(role, required)
    } else if !required.is_empty() {
        permissions::has_any_permission(role, required)
    } else {
        true
    };

    if granted {
        GateDecision::Grant
    } else {
        GateDecision::Deny
    }
}

/// Boolean form of the gate rules for use outside rendering.
///
/// Returns `false` while loading.
///
/// # Examples
///
/// ```
/// use console_access::context::AccessState;
/// use console_access::gate::can_access;
/// use console_access::permissions::{Permission, Role};
/// use uuid::Uuid;
///
/// let state = AccessState::Ready { user_id: Uuid::nil(), tenant_id: Uuid::nil(), role: Role::Viewer };
/// assert!(can_access(&state, &[], false));
/// assert!(!can_access(&state, &[Permission::AgentsCreate], false));
/// ```
#[must_use]
pub fn can_access(state: &AccessState, required: &[Permission], require_all: bool) -> bool {
    evaluate(state, required, require_all) == GateDecision::Grant
}

/// Wording for the access denied panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeniedCopy {
    pub title: String,
    pub message: String,
}

impl Default for DeniedCopy {
    fn default() -> Self {
        Self {
            title: "Access denied".into(),
            message: "You don't have permission to view this content. \
                      Ask a workspace admin if you need access."
                .into(),
        }
    }
}

/// The built-in access denied panel. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeniedPanel {
    pub title: String,
    pub message: String,
    /// The viewer's role at the time of the decision.
    pub role: Role,
    /// Required permissions the role does not hold.
    pub missing: Vec<Permission>,
}

/// What a gate renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "content", rename_all = "snake_case")]
pub enum GateView<V> {
    /// Render nothing (loading, or denied with no fallback).
    Nothing,
    Children(V),
    Fallback(V),
    Denied(DeniedPanel),
}

impl<V> GateView<V> {
    #[must_use]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// The rendered node, if the gate produced children or a fallback.
    pub fn into_inner(self) -> Option<V> {
        match self {
            Self::Children(v) | Self::Fallback(v) => Some(v),
            Self::Nothing | Self::Denied(_) => None,
        }
    }
}

/// A gate around a protected subtree of type `V`.
///
/// ```
/// use console_access::context::AccessState;
/// use console_access::gate::{GateView, PermissionGate};
/// use console_access::permissions::{Permission, Role};
/// use uuid::Uuid;
///
/// let state = AccessState::Ready { user_id: Uuid::nil(), tenant_id: Uuid::nil(), role: Role::Member };
/// let view = PermissionGate::new()
///     .permission(Permission::AnalyticsExport)
///     .fallback("upgrade banner")
///     .render(&state, || "export button");
/// assert_eq!(view, GateView::Fallback("upgrade banner"));
/// ```
#[derive(Debug, Clone)]
pub struct PermissionGate<V> {
    permission: Option<Permission>,
    permissions: Vec<Permission>,
    require_all: bool,
    fallback: Option<V>,
    show_denied: bool,
    denied_copy: DeniedCopy,
}

impl<V> PermissionGate<V> {
    /// A gate with no constraints. Renders its children for any role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            permission: None,
            permissions: Vec::new(),
            require_all: false,
            fallback: None,
            show_denied: false,
            denied_copy: DeniedCopy::default(),
        }
    }

    /// Require a single permission.
    #[must_use]
    pub fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Require a list of permissions (any of them, unless `require_all`).
    #[must_use]
    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = permissions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    /// Rendered instead of the children on denial, unless `show_denied` is set.
    #[must_use]
    pub fn fallback(mut self, fallback: V) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Show the access denied panel on denial instead of the fallback.
    #[must_use]
    pub fn show_denied(mut self, show_denied: bool) -> Self {
        self.show_denied = show_denied;
        self
    }

    #[must_use]
    pub fn denied_copy(mut self, copy: DeniedCopy) -> Self {
        self.denied_copy = copy;
        self
    }

    /// The single permission unioned with the permission list, in catalog order.
    #[must_use]
    pub fn required(&self) -> Vec<Permission> {
        self.permission
            .into_iter()
            .chain(self.permissions.iter().copied())
            .collect::<PermissionSet>()
            .to_permissions()
    }

    #[must_use]
    pub fn decide(&self, state: &AccessState) -> GateDecision {
        evaluate(state, &self.required(), self.require_all)
    }

    /// Render against one snapshot.
    ///
    /// `children` is only called on a grant.
    pub fn render(self, state: &AccessState, children: impl FnOnce() -> V) -> GateView<V> {
        let required = self.required();

        match evaluate(state, &required, self.require_all) {
            GateDecision::Pending => GateView::Nothing,
            GateDecision::Grant => GateView::Children(children()),
            GateDecision::Deny => {
                let role = state.effective_role();
                debug!(
                    %role,
                    required = ?required,
                    require_all = self.require_all,
                    "Permission gate denied"
                );

                if self.show_denied {
                    GateView::Denied(DeniedPanel {
                        title: self.denied_copy.title,
                        message: self.denied_copy.message,
                        role,
                        missing: permissions::missing_permissions(role, &required)
                            .to_permissions(),
                    })
                } else {
                    self.fallback.map_or(GateView::Nothing, GateView::Fallback)
                }
            }
        }
    }
}

impl<V> Default for PermissionGate<V> {
    fn default() -> Self {
        Self::new()
    }
}
