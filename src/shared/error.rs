use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts tell a tracker problem apart from broken link
/// data without parsing stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The tree was rendered
    Success = 0,
    /// Any other application error (config, file I/O, snapshot, ...)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// The issue source failed (not found, auth, network, timeout)
    FetchFailed = 3,
    /// The link graph is not a DAG, or the root is missing from it
    GraphError = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::FetchFailed => write!(f, "Fetch Failed (3)"),
            ExitCode::GraphError => write!(f, "Graph Error (4)"),
        }
    }
}

/// Application-specific errors for building and rendering blocker trees.
///
/// Uses thiserror to derive Display and Error traits; every variant carries
/// enough context to be shown to the user as-is.
#[derive(Debug, Error)]
pub enum BlockersError {
    #[error("Issue not found: {key}\n\n💡 Hint: Check the issue key and that your account can see it")]
    IssueNotFound { key: String },

    #[error("Temporary failure while fetching {key}\nDetails: {details}\n\n💡 Hint: Check your network connection or try again with --timeout")]
    TransientFetch { key: String, details: String },

    #[error("Failed to fetch {key}\nDetails: {details}")]
    FetchFailed { key: String, details: String },

    #[error("Issue links do not form a DAG; a cycle involves: {}\n\n💡 Hint: Remove the mutual link in the tracker or choose another link type", .nodes.join(", "))]
    NotADag { nodes: Vec<String> },

    #[error("Issue {key} is not part of the graph")]
    NodeNotFound { key: String },

    #[error("Invalid issue key '{key}': {reason}")]
    InvalidIssueKey { key: String, reason: String },

    #[error("Invalid issue document for {key}: {details}")]
    InvalidIssueDocument { key: String, details: String },

    #[error("Failed to read graph snapshot: {path}\nDetails: {details}\n\n💡 Hint: Snapshots are written with --save-snapshot")]
    SnapshotReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl BlockersError {
    /// Whether this error came from the issue source rather than the graph.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            BlockersError::IssueNotFound { .. }
                | BlockersError::TransientFetch { .. }
                | BlockersError::FetchFailed { .. }
        )
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            BlockersError::IssueNotFound { .. }
            | BlockersError::TransientFetch { .. }
            | BlockersError::FetchFailed { .. } => ExitCode::FetchFailed,
            BlockersError::NotADag { .. } | BlockersError::NodeNotFound { .. } => {
                ExitCode::GraphError
            }
            _ => ExitCode::ApplicationError,
        }
    }
}

/// Picks the exit code for any error that reached `main`.
///
/// Errors that are not a `BlockersError` anywhere in their chain are plain
/// application errors.
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<BlockersError>())
        .map(BlockersError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}
