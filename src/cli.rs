use clap::Parser;
use std::path::PathBuf;

use blockers::application::dto::TreeDirection;
use blockers::issue_graph::domain::IssueKey;

/// Show the chain of issues blocking an issue as a tree
#[derive(Parser, Debug)]
#[command(name = "blockers")]
#[command(version)]
#[command(
    about = "Show the chain of issues blocking an issue as a tree",
    long_about = "Fetches an issue and everything linked to it, keeps the links of the \
                  requested types and prints the issues that (transitively) block it as \
                  a tree.\n\nThe API token is read from the BLOCKERS_API_TOKEN environment \
                  variable."
)]
pub struct Args {
    /// Root issue key (e.g. PROJ-123)
    #[arg(required_unless_present_any = ["query", "load_snapshot"])]
    pub issue: Option<IssueKey>,

    /// Render one tree per issue matching this query (JQL for a server)
    #[arg(short, long, conflicts_with_all = ["issue", "load_snapshot"])]
    pub query: Option<String>,

    /// Link type to follow and render; can be given multiple times [default: Blocks]
    #[arg(short, long = "link-type", value_name = "TYPE")]
    pub link_type: Vec<String>,

    /// Which side of the root to show: ancestors (blockers) or descendants
    #[arg(short, long)]
    pub direction: Option<TreeDirection>,

    /// Tracker base URL (e.g. https://jira.example.com)
    #[arg(long, conflicts_with = "issues_dir")]
    pub server: Option<String>,

    /// Tracker account for basic auth
    #[arg(short, long)]
    pub user: Option<String>,

    /// Read issue documents (<KEY>.json) from this directory instead of a server
    #[arg(long, value_name = "DIR")]
    pub issues_dir: Option<PathBuf>,

    /// Render from a saved graph snapshot without contacting the tracker
    #[arg(long, value_name = "FILE", conflicts_with_all = ["server", "issues_dir"])]
    pub load_snapshot: Option<PathBuf>,

    /// Save the fetched graph to a snapshot file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["query", "load_snapshot"])]
    pub save_snapshot: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a config file (default: ./blockers.config.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of issues fetched at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Timeout in seconds for a single fetch
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Suppress progress output on stderr
    #[arg(long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
