use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::process::Command;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use gitlab_issue_list::config::Config;
use gitlab_issue_list::formatter::issue_list_rows;
use gitlab_issue_list::gitlab::GitLabClient;
use gitlab_issue_list::pager::{output_with_pager, select_pager};
use gitlab_issue_list::services::{IssueListOutcome, IssueListService};
use gitlab_issue_list::types::{PageOption, RawOptions, RepositoryId, RepositoryUrl};

#[derive(Parser)]
#[command(name = "gitlab-issue-list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List GitLab project issues with state, label, milestone and assignee filters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Output format - text prints a summary line and issue rows, json prints the raw issue list
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
    /// GitLab personal access token (can also be set via GITLAB_TOKEN or the config file)
    #[arg(long, global = true)]
    token: Option<String>,
    /// GitLab instance URL (can also be set via GITLAB_HOST; default: https://gitlab.com)
    #[arg(long, global = true)]
    host: Option<String>,
    /// Request timeout in seconds for GitLab API calls (default: 30 seconds)
    #[arg(long, global = true)]
    request_timeout: Option<u64>,
    /// Pager command for text output; pass an empty string to disable paging
    #[arg(long, global = true)]
    pager: Option<String>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List project issues
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Filter issue by assignee <username>
    #[arg(long)]
    assignee: Option<String>,
    /// Filter issue by label <name>
    #[arg(short, long)]
    label: Option<String>,
    /// Filter issue by milestone <id>
    #[arg(long)]
    milestone: Option<String>,
    /// Filter only issues assigned to me
    #[arg(long)]
    mine: bool,
    /// Get all issues
    #[arg(short, long)]
    all: bool,
    /// Get only closed issues
    #[arg(short, long)]
    closed: bool,
    /// Get only opened issues
    #[arg(short, long)]
    opened: bool,
    /// Filter by confidential issues
    #[arg(long)]
    confidential: bool,
    /// Page number (default: 1)
    #[arg(short, long)]
    page: Option<u32>,
    /// Number of items to list per page (default: 30)
    #[arg(short = 'P', long)]
    per_page: Option<u32>,
    /// Repository as group/project or a git URL (default: config, then the origin remote)
    #[arg(short = 'R', long)]
    repo: Option<String>,
}

impl From<&ListArgs> for RawOptions {
    fn from(args: &ListArgs) -> Self {
        RawOptions {
            all: args.all,
            closed: args.closed,
            opened: args.opened,
            assignee: args.assignee.clone(),
            label: args.label.clone(),
            milestone: args.milestone.clone(),
            confidential: args.confidential.then_some(true),
            page: PageOption::from(args.page),
            per_page: PageOption::from(args.per_page),
            mine: args.mine,
        }
    }
}

const DEFAULT_LOG_DIRECTIVE: &str = "gitlab_issue_list=warn";

/// `RUST_LOG` when set, otherwise warnings from this crate only
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if cli.token.is_some() {
        config.token = cli.token.clone();
    }
    if cli.host.is_some() {
        config.host = cli.host.clone();
    }
    if cli.pager.is_some() {
        config.pager = cli.pager.clone();
    }
    let request_timeout = cli
        .request_timeout
        .or(config.request_timeout_secs)
        .map(Duration::from_secs);

    match &cli.command {
        Commands::List(args) => {
            handle_list_command(args, &cli.format, &config, request_timeout).await?;
        }
    }

    Ok(())
}

/// Handle list command
async fn handle_list_command(
    args: &ListArgs,
    format: &OutputFormat,
    config: &Config,
    request_timeout: Option<Duration>,
) -> Result<()> {
    let gitlab_client =
        GitLabClient::new(config.host_or_default(), config.token.clone(), request_timeout)
            .context("Failed to create GitLab client")?;

    let repository_id = resolve_repository(args.repo.as_deref(), config)?;

    let service = IssueListService::new(gitlab_client);
    let outcome = service.list(&repository_id, &RawOptions::from(args)).await?;

    match format {
        OutputFormat::Json => {
            let json_output = serde_json::to_string_pretty(&outcome.issues)?;
            println!("{}", json_output);
        }
        OutputFormat::Text => {
            let pager = select_pager(config.pager.as_deref());
            output_with_pager(&render_text(&outcome), pager.as_deref())?;
        }
    }

    Ok(())
}

fn render_text(outcome: &IssueListOutcome) -> String {
    let rows = issue_list_rows(&outcome.issues, chrono::Utc::now());
    if rows.0.is_empty() {
        format!("{}\n", outcome.summary)
    } else {
        format!("{}\n\n{}", outcome.summary, rows.0)
    }
}

/// Repository from `--repo`, then the configured default, then the origin remote
fn resolve_repository(repo_arg: Option<&str>, config: &Config) -> Result<RepositoryId> {
    let repo = match repo_arg.or(config.default_repo.as_deref()) {
        Some(repo) => repo.to_string(),
        None => origin_remote_url()?,
    };

    RepositoryId::parse_url(&RepositoryUrl::from(repo.as_str()))
        .map_err(|e| anyhow::anyhow!("Failed to determine repository: {}", e))
}

fn origin_remote_url() -> Result<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
        .context("Failed to run git; pass --repo to name the repository")?;

    if !output.status.success() {
        return Err(anyhow::anyhow!(
            "No origin remote found; pass --repo to name the repository"
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
