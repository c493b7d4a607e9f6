//! Permission catalog.
//!
//! Every action the dashboard can gate, namespaced as `area.action`.

use std::fmt;
use std::str::FromStr;

use super::evaluator::PermissionError;
use super::set::PermissionSet;

/// A single dashboard permission.
///
/// The serialized form is the dotted wire name returned by [`Permission::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Permission {
    /// View agents and their configuration
    #[serde(rename = "agents.view")]
    AgentsView,
    /// Create new agents
    #[serde(rename = "agents.create")]
    AgentsCreate,
    /// Edit agent prompts, tools and settings
    #[serde(rename = "agents.edit")]
    AgentsEdit,
    /// Delete agents
    #[serde(rename = "agents.delete")]
    AgentsDelete,
    /// Deploy agents to live channels
    #[serde(rename = "agents.deploy")]
    AgentsDeploy,
    /// Read conversations
    #[serde(rename = "conversations.view")]
    ConversationsView,
    /// Reply inside a conversation
    #[serde(rename = "conversations.reply")]
    ConversationsReply,
    /// Assign conversations to teammates
    #[serde(rename = "conversations.assign")]
    ConversationsAssign,
    /// Delete conversations
    #[serde(rename = "conversations.delete")]
    ConversationsDelete,
    /// View analytics dashboards
    #[serde(rename = "analytics.view")]
    AnalyticsView,
    /// Export analytics data
    #[serde(rename = "analytics.export")]
    AnalyticsExport,
    /// View the team roster
    #[serde(rename = "team.view")]
    TeamView,
    /// Invite new teammates
    #[serde(rename = "team.invite")]
    TeamInvite,
    /// Change teammates' roles or remove them
    #[serde(rename = "team.manage")]
    TeamManage,
    /// View workspace settings
    #[serde(rename = "settings.view")]
    SettingsView,
    /// Change workspace settings
    #[serde(rename = "settings.manage")]
    SettingsManage,
    /// View plan and invoices
    #[serde(rename = "billing.view")]
    BillingView,
    /// Change plan and payment details
    #[serde(rename = "billing.manage")]
    BillingManage,
}

impl Permission {
    /// Returns the dotted wire name, e.g. `agents.create`.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_access::permissions::Permission;
    ///
    /// assert_eq!(Permission::TeamInvite.as_str(), "team.invite");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AgentsView => "agents.view",
            Self::AgentsCreate => "agents.create",
            Self::AgentsEdit => "agents.edit",
            Self::AgentsDelete => "agents.delete",
            Self::AgentsDeploy => "agents.deploy",
            Self::ConversationsView => "conversations.view",
            Self::ConversationsReply => "conversations.reply",
            Self::ConversationsAssign => "conversations.assign",
            Self::ConversationsDelete => "conversations.delete",
            Self::AnalyticsView => "analytics.view",
            Self::AnalyticsExport => "analytics.export",
            Self::TeamView => "team.view",
            Self::TeamInvite => "team.invite",
            Self::TeamManage => "team.manage",
            Self::SettingsView => "settings.view",
            Self::SettingsManage => "settings.manage",
            Self::BillingView => "billing.view",
            Self::BillingManage => "billing.manage",
        }
    }

    /// The resource area this permission belongs to (the part before the dot).
    #[must_use]
    pub fn area(&self) -> &'static str {
        let name = self.as_str();
        name.split_once('.').map_or(name, |(area, _)| area)
    }

    /// Returns all permissions as a slice.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::AgentsView,
            Self::AgentsCreate,
            Self::AgentsEdit,
            Self::AgentsDelete,
            Self::AgentsDeploy,
            Self::ConversationsView,
            Self::ConversationsReply,
            Self::ConversationsAssign,
            Self::ConversationsDelete,
            Self::AnalyticsView,
            Self::AnalyticsExport,
            Self::TeamView,
            Self::TeamInvite,
            Self::TeamManage,
            Self::SettingsView,
            Self::SettingsManage,
            Self::BillingView,
            Self::BillingManage,
        ]
    }

    /// Returns a human-readable description of the permission.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AgentsView => "View agents",
            Self::AgentsCreate => "Create agents",
            Self::AgentsEdit => "Edit agents",
            Self::AgentsDelete => "Delete agents",
            Self::AgentsDeploy => "Deploy agents to live channels",
            Self::ConversationsView => "Read conversations",
            Self::ConversationsReply => "Reply to conversations",
            Self::ConversationsAssign => "Assign conversations to teammates",
            Self::ConversationsDelete => "Delete conversations",
            Self::AnalyticsView => "View analytics",
            Self::AnalyticsExport => "Export analytics data",
            Self::TeamView => "View the team roster",
            Self::TeamInvite => "Invite teammates",
            Self::TeamManage => "Manage teammates and their roles",
            Self::SettingsView => "View workspace settings",
            Self::SettingsManage => "Change workspace settings",
            Self::BillingView => "View billing",
            Self::BillingManage => "Manage billing and plan",
        }
    }

    /// The single-bit [`PermissionSet`] for this permission.
    #[must_use]
    pub const fn flag(self) -> PermissionSet {
        match self {
            Self::AgentsView => PermissionSet::AGENTS_VIEW,
            Self::AgentsCreate => PermissionSet::AGENTS_CREATE,
            Self::AgentsEdit => PermissionSet::AGENTS_EDIT,
            Self::AgentsDelete => PermissionSet::AGENTS_DELETE,
            Self::AgentsDeploy => PermissionSet::AGENTS_DEPLOY,
            Self::ConversationsView => PermissionSet::CONVERSATIONS_VIEW,
            Self::ConversationsReply => PermissionSet::CONVERSATIONS_REPLY,
            Self::ConversationsAssign => PermissionSet::CONVERSATIONS_ASSIGN,
            Self::ConversationsDelete => PermissionSet::CONVERSATIONS_DELETE,
            Self::AnalyticsView => PermissionSet::ANALYTICS_VIEW,
            Self::AnalyticsExport => PermissionSet::ANALYTICS_EXPORT,
            Self::TeamView => PermissionSet::TEAM_VIEW,
            Self::TeamInvite => PermissionSet::TEAM_INVITE,
            Self::TeamManage => PermissionSet::TEAM_MANAGE,
            Self::SettingsView => PermissionSet::SETTINGS_VIEW,
            Self::SettingsManage => PermissionSet::SETTINGS_MANAGE,
            Self::BillingView => PermissionSet::BILLING_VIEW,
            Self::BillingManage => PermissionSet::BILLING_MANAGE,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| PermissionError::UnknownPermission(name.to_owned()))
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        permission.flag()
    }
}
