//! Console Access
//!
//! Role-based access control for the multi-tenant console dashboard: the
//! static role → permission table, permission evaluation, the per-tenant
//! evaluation context and the permission gate that decides what a protected
//! part of the UI renders.

pub mod config;
pub mod context;
pub mod gate;
pub mod observability;
pub mod permissions;
pub mod source;

pub use context::{AccessContext, AccessState, MembershipSource};
pub use gate::{can_access, GateDecision, GateView, PermissionGate};
pub use permissions::{Permission, PermissionSet, Role};
pub use source::JsonMemberships;
