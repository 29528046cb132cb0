//! # sw-cli
//!
//! Command-line interface for spec workflow approvals.
//!
//! Two kinds of callers share one on-disk store, and this binary serves
//! both:
//! - `sw request/status/delete` — the agent-facing actions, routed
//!   through the handler layer where the approved-only delete gate and
//!   guidance strings live
//! - `sw list/respond/remove` — the reviewer-facing tooling, acting on
//!   the store directly on human authority

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Spec workflow CLI — request, review, and resolve approval gates.
#[derive(Parser)]
#[command(name = "sw", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Dashboard URL to include in guidance, if one is running.
    #[arg(long, env = "SW_DASHBOARD_URL")]
    dashboard_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new approval request (agent path).
    Request {
        /// Brief title describing what needs approval.
        title: String,
        /// Path to the file under review, relative to the project root.
        #[arg(long)]
        file_path: String,
        /// Approval type: "document" or "action".
        #[arg(long, default_value = "document")]
        r#type: String,
        /// Category: "spec" or "steering".
        #[arg(long)]
        category: String,
        /// Name of the spec, or the steering namespace.
        #[arg(long)]
        category_name: String,
    },
    /// Check the status of an approval request (agent path).
    Status {
        /// Approval request ID.
        id: String,
    },
    /// Delete an approved request (agent path; approved-only).
    Delete {
        /// Approval request ID.
        id: String,
    },
    /// List all approval requests in the project store.
    List,
    /// Record a review decision on a pending request (reviewer path).
    Respond {
        /// Approval request ID.
        id: String,
        /// Decision: "approved", "rejected", or "needs-revision".
        #[arg(long)]
        status: String,
        /// Free-text reviewer message.
        #[arg(long)]
        response: Option<String>,
        /// Free-text reviewer notes.
        #[arg(long)]
        annotations: Option<String>,
        /// General comment; repeatable.
        #[arg(long = "comment")]
        comments: Vec<String>,
        /// Selection comment as "EXCERPT::COMMENT"; repeatable.
        #[arg(long = "selection")]
        selections: Vec<String>,
    },
    /// Remove a request unconditionally (reviewer reset tooling).
    Remove {
        /// Approval request ID.
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sw_approvals=info".parse()?)
                .add_directive("sw_handlers=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);

    match &cli.command {
        Commands::Request {
            title,
            file_path,
            r#type,
            category,
            category_name,
        } => commands::agent::request(
            &project_root,
            cli.dashboard_url.as_deref(),
            title,
            file_path,
            r#type,
            category,
            category_name,
        ),
        Commands::Status { id } => {
            commands::agent::status(&project_root, cli.dashboard_url.as_deref(), id)
        }
        Commands::Delete { id } => {
            commands::agent::delete(&project_root, cli.dashboard_url.as_deref(), id)
        }
        Commands::List => commands::review::list(&project_root),
        Commands::Respond {
            id,
            status,
            response,
            annotations,
            comments,
            selections,
        } => commands::review::respond(
            &project_root,
            id,
            status,
            response.as_deref(),
            annotations.as_deref(),
            comments,
            selections,
        ),
        Commands::Remove { id } => commands::review::remove(&project_root, id),
    }
}
