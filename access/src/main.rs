//! Console Access CLI
//!
//! Prints the role table, evaluates permission gates and resolves a user's
//! access from a membership export.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use console_access::config::Config;
use console_access::context::{AccessContext, AccessState};
use console_access::gate::{DeniedCopy, GateDecision, GateView, PermissionGate};
use console_access::observability;
use console_access::permissions::{Permission, Role};
use console_access::source::JsonMemberships;

#[derive(Debug, Parser)]
#[command(name = "console-access", version, about = "Inspect dashboard role permissions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the role → permission table as JSON
    Matrix,

    /// Evaluate a permission gate for a role and print what it renders
    Check(CheckArgs),

    /// Resolve a user's role in a tenant from a JSON-lines membership export
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Role name; unknown names evaluate as `no_access`
    #[arg(long)]
    role: String,

    /// Single required permission
    #[arg(long)]
    permission: Option<Permission>,

    /// Comma-separated list of required permissions
    #[arg(long, value_delimiter = ',')]
    permissions: Vec<Permission>,

    /// Require every permission instead of any one
    #[arg(long)]
    require_all: bool,

    /// Show the access denied panel on denial
    #[arg(long)]
    show_denied: bool,

    /// Fallback content rendered on denial
    #[arg(long)]
    fallback: Option<String>,

    /// Evaluate as if the role were still loading
    #[arg(long)]
    loading: bool,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// File with one membership JSON object per line
    #[arg(long)]
    memberships: PathBuf,

    #[arg(long)]
    user_id: Uuid,

    #[arg(long)]
    tenant_id: Uuid,
}

#[derive(Debug, Serialize)]
struct PermissionEntry {
    name: Permission,
    area: &'static str,
    description: &'static str,
}

impl From<Permission> for PermissionEntry {
    fn from(permission: Permission) -> Self {
        Self {
            name: permission,
            area: permission.area(),
            description: permission.description(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatrixRow {
    role: Role,
    permissions: Vec<PermissionEntry>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    role: Role,
    required: Vec<Permission>,
    require_all: bool,
    decision: GateDecision,
    view: GateView<String>,
}

#[derive(Debug, Serialize)]
struct ResolveReport {
    user_id: Uuid,
    tenant_id: Uuid,
    role: Role,
    joined_at: Option<DateTime<Utc>>,
    state: AccessState,
    permissions: Vec<PermissionEntry>,
}

fn permission_entries(role: Role) -> Vec<PermissionEntry> {
    role.permissions()
        .to_permissions()
        .into_iter()
        .map(PermissionEntry::from)
        .collect()
}

/// One row per role, `no_access` included.
fn matrix_rows() -> Vec<MatrixRow> {
    Role::ALL
        .into_iter()
        .map(|role| MatrixRow {
            role,
            permissions: permission_entries(role),
        })
        .collect()
}

fn check_report(args: CheckArgs, copy: DeniedCopy) -> CheckReport {
    let role = Role::resolve(&args.role);
    let state = if args.loading {
        AccessState::Loading {
            user_id: Uuid::nil(),
            tenant_id: Uuid::nil(),
        }
    } else {
        AccessState::Ready {
            user_id: Uuid::nil(),
            tenant_id: Uuid::nil(),
            role,
        }
    };

    let mut gate = PermissionGate::new()
        .permissions(args.permissions)
        .require_all(args.require_all)
        .show_denied(args.show_denied)
        .denied_copy(copy);
    if let Some(permission) = args.permission {
        gate = gate.permission(permission);
    }
    if let Some(fallback) = args.fallback {
        gate = gate.fallback(fallback);
    }

    let required = gate.required();
    let decision = gate.decide(&state);
    let view = gate.render(&state, || "children".to_string());

    CheckReport {
        role,
        required,
        require_all: args.require_all,
        decision,
        view,
    }
}

async fn resolve_report(
    source: &JsonMemberships,
    user_id: Uuid,
    tenant_id: Uuid,
) -> Result<ResolveReport> {
    let ctx = AccessContext::new();
    let role = ctx.load(source, user_id, tenant_id).await?;

    Ok(ResolveReport {
        user_id,
        tenant_id,
        role,
        joined_at: source.get(user_id, tenant_id).and_then(|m| m.joined_at),
        state: ctx.snapshot(),
        permissions: permission_entries(role),
    })
}

async fn read_memberships(path: &Path) -> Result<JsonMemberships> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let source = JsonMemberships::from_json_lines(&raw)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    info!(path = %path.display(), rows = source.len(), "Loaded memberships");
    Ok(source)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    observability::init(&config)?;

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "Starting console-access");

    let output = match cli.command {
        Command::Matrix => serde_json::to_string_pretty(&matrix_rows())?,
        Command::Check(args) => {
            serde_json::to_string_pretty(&check_report(args, config.denied_copy()))?
        }
        Command::Resolve(args) => {
            let source = read_memberships(&args.memberships).await?;
            let report = resolve_report(&source, args.user_id, args.tenant_id).await?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("console-access").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    fn check(args: &[&str]) -> Value {
        let Command::Check(args) = parse(&[&["check"][..], args].concat()) else {
            panic!("expected check subcommand");
        };
        serde_json::to_value(check_report(args, DeniedCopy::default())).unwrap()
    }

    #[test]
    fn test_matrix_lists_every_role_with_described_permissions() {
        let rows = serde_json::to_value(matrix_rows()).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), Role::ALL.len());

        let owner = &rows[0];
        assert_eq!(owner["role"], "owner");
        assert_eq!(
            owner["permissions"].as_array().unwrap().len(),
            Permission::all().len()
        );
        assert_eq!(
            owner["permissions"][0],
            json!({ "name": "agents.view", "area": "agents", "description": "View agents" })
        );

        let no_access = rows.iter().find(|r| r["role"] == "no_access").unwrap();
        assert_eq!(no_access["permissions"], json!([]));
    }

    #[test]
    fn test_check_denies_viewer_with_panel() {
        let report = check(&["--role", "viewer", "--permission", "agents.create", "--show-denied"]);

        assert_eq!(report["decision"], "deny");
        assert_eq!(report["view"]["view"], "denied");
        assert_eq!(report["view"]["content"]["missing"], json!(["agents.create"]));
    }

    #[test]
    fn test_check_unknown_role_is_no_access() {
        let report = check(&["--role", "superuser", "--permissions", "team.view"]);

        assert_eq!(report["role"], "no_access");
        assert_eq!(report["decision"], "deny");
        assert_eq!(report["view"], json!({ "view": "nothing" }));
    }

    #[test]
    fn test_check_loading_renders_nothing() {
        let report = check(&["--role", "owner", "--permission", "billing.view", "--loading"]);

        assert_eq!(report["decision"], "pending");
        assert_eq!(report["view"], json!({ "view": "nothing" }));
    }

    #[test]
    fn test_check_require_all_merges_single_and_list() {
        let report = check(&[
            "--role",
            "member",
            "--permission",
            "team.view",
            "--permissions",
            "team.invite,team.view",
            "--require-all",
            "--fallback",
            "read only",
        ]);

        assert_eq!(report["required"], json!(["team.view", "team.invite"]));
        assert_eq!(report["require_all"], true);
        assert_eq!(report["view"], json!({ "view": "fallback", "content": "read only" }));
    }

    #[test]
    fn test_unknown_permission_is_rejected() {
        let result = Cli::try_parse_from([
            "console-access",
            "check",
            "--role",
            "viewer",
            "--permission",
            "agents.fly",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_resolve_report_from_export() {
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();
        let raw = format!(
            r#"{{"user_id":"{user_id}","tenant_id":"{tenant_id}","role":"admin","joined_at":"2026-03-01T09:30:00Z"}}"#
        );
        let source = JsonMemberships::from_json_lines(&raw).unwrap();

        let report = serde_json::to_value(resolve_report(&source, user_id, tenant_id).await.unwrap())
            .unwrap();
        assert_eq!(report["role"], "admin");
        assert_eq!(report["joined_at"], "2026-03-01T09:30:00Z");
        assert_eq!(report["state"]["state"], "ready");
        assert!(report["permissions"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p["name"] == "settings.manage"));

        let other = resolve_report(&source, user_id, Uuid::new_v4()).await.unwrap();
        assert_eq!(other.role, Role::NoAccess);
        assert!(other.joined_at.is_none());
        assert!(other.permissions.is_empty());
    }
}
