mod cli;
mod config;

use blockers::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
use blockers::adapters::outbound::filesystem::{DirectoryIssueSource, JsonSnapshotStore};
use blockers::adapters::outbound::network::{CachingIssueSource, JiraIssueSource};
use blockers::application::dto::{BlockerTreeRequest, BlockerTreeResponse};
use blockers::application::factories::{PresenterFactory, PresenterType};
use blockers::application::use_cases::{render_blocker_tree, RenderBlockerTreeUseCase};
use blockers::ports::outbound::{GraphSnapshotStore, IssueSource, ProgressReporter};
use blockers::shared::error::{exit_code_for, BlockersError};
use blockers::shared::Result;
use cli::Args;
use config::{discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

/// Environment variable holding the tracker API token
const TOKEN_ENV_VAR: &str = "BLOCKERS_API_TOKEN";

/// Per-fetch timeout when neither the CLI nor the config sets one
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const NO_SOURCE_MESSAGE: &str = "no issue source configured.\n\n💡 Hint: Pass --server or --issues-dir, or set one in blockers.config.yml";

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        let header = "❌ An error occurred:";
        if io::stderr().is_terminal() {
            eprintln!("\n{}\n", header.red().bold());
        } else {
            eprintln!("\n{}\n", header);
        }
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.quiet)?;
    let request = build_request(&args, &config)?;

    let trees = if let Some(path) = &args.load_snapshot {
        render_snapshot(path, request)?
    } else if args.quiet {
        fetch_and_render(&args, &config, request, QuietProgressReporter::new()).await?
    } else {
        fetch_and_render(&args, &config, request, StderrProgressReporter::new()).await?
    };

    if trees.is_empty() {
        if !args.quiet {
            eprintln!("⚠️  No issues matched the query.");
        }
        return Ok(());
    }

    // each tree is followed by a blank line
    let output: String = trees.iter().map(|r| format!("{}\n", r.tree)).collect();

    let presenter = PresenterFactory::create(PresenterType::for_output(args.output.clone()));
    presenter.present(&output)?;

    Ok(())
}

/// Explicit `--config` must exist; otherwise `./blockers.config.yml` is optional
fn load_config(explicit: Option<&Path>, quiet: bool) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        let config = load_config_from_path(path)?;
        if !quiet {
            eprintln!("📄 Loaded config from: {}", path.display());
        }
        return Ok(config);
    }

    match discover_config(Path::new("."))? {
        Some(config) => {
            if !quiet {
                eprintln!("📄 Auto-discovered config file: {}", CONFIG_FILENAME);
            }
            Ok(config)
        }
        None => Ok(ConfigFile::default()),
    }
}

/// Merges CLI flags over config values over built-in defaults
fn build_request(args: &Args, config: &ConfigFile) -> Result<BlockerTreeRequest> {
    let link_types = if args.link_type.is_empty() {
        config.link_types.clone().unwrap_or_default()
    } else {
        args.link_type.clone()
    };
    let direction = match args.direction {
        Some(direction) => direction,
        None => config.tree_direction()?.unwrap_or_default(),
    };
    let concurrency = args.concurrency.or(config.concurrency).unwrap_or(1);
    let timeout_secs = args
        .timeout
        .or(config.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let mut builder = BlockerTreeRequest::builder()
        .link_types(link_types)
        .direction(direction)
        .concurrency(concurrency)
        .fetch_timeout(Duration::from_secs(timeout_secs));
    if let Some(issue) = &args.issue {
        builder = builder.root(issue.clone());
    }

    Ok(builder.build()?)
}

fn render_snapshot(path: &Path, request: BlockerTreeRequest) -> Result<Vec<BlockerTreeResponse>> {
    let snapshot = JsonSnapshotStore::new(path).load()?;
    let request = match request.root {
        Some(_) => request,
        None => request.with_root(snapshot.root.clone()),
    };
    Ok(vec![render_blocker_tree(&snapshot.graph, &request)?])
}

/// Where issues come from, after applying CLI-over-config precedence
enum SourceChoice {
    Directory(PathBuf),
    Server(String),
}

fn choose_source(args: &Args, config: &ConfigFile) -> Result<SourceChoice> {
    if let Some(dir) = &args.issues_dir {
        return Ok(SourceChoice::Directory(dir.clone()));
    }
    if let Some(server) = &args.server {
        return Ok(SourceChoice::Server(server.clone()));
    }
    if let Some(dir) = &config.issues_dir {
        return Ok(SourceChoice::Directory(dir.clone()));
    }
    if let Some(server) = &config.server {
        return Ok(SourceChoice::Server(server.clone()));
    }
    Err(BlockersError::InvalidConfig {
        message: NO_SOURCE_MESSAGE.to_string(),
    }
    .into())
}

async fn fetch_and_render<P: ProgressReporter>(
    args: &Args,
    config: &ConfigFile,
    request: BlockerTreeRequest,
    reporter: P,
) -> Result<Vec<BlockerTreeResponse>> {
    match choose_source(args, config)? {
        SourceChoice::Directory(dir) => {
            let source = DirectoryIssueSource::new(dir)?;
            execute(args, source, reporter, request).await
        }
        SourceChoice::Server(server) => {
            let timeout = request
                .fetch_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
            let mut jira = JiraIssueSource::new(&server, timeout)?
                .with_max_retries(config.max_retries.unwrap_or(0));

            let user = args.user.as_ref().or(config.user.as_ref());
            match (user, std::env::var(TOKEN_ENV_VAR).ok()) {
                (Some(user), Some(token)) => jira = jira.with_credentials(user, token),
                (None, Some(token)) => jira = jira.with_token(token),
                (Some(_), None) => {
                    return Err(BlockersError::InvalidConfig {
                        message: format!("a user was given but {} is not set", TOKEN_ENV_VAR),
                    }
                    .into());
                }
                (None, None) => {}
            }

            execute(args, jira, reporter, request).await
        }
    }
}

async fn execute<S: IssueSource, P: ProgressReporter>(
    args: &Args,
    source: S,
    reporter: P,
    request: BlockerTreeRequest,
) -> Result<Vec<BlockerTreeResponse>> {
    let use_case = RenderBlockerTreeUseCase::new(CachingIssueSource::new(source), reporter);

    if let Some(query) = &args.query {
        return use_case.execute_for_query(query, request).await;
    }

    let Some(snapshot_path) = &args.save_snapshot else {
        return Ok(vec![use_case.execute(request).await?]);
    };

    let graph = use_case.build_graph(&request).await?;
    JsonSnapshotStore::new(snapshot_path).save(&graph, request.require_root()?)?;
    Ok(vec![use_case.render(&graph, &request)?])
}
