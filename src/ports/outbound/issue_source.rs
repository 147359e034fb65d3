use crate::issue_graph::domain::{Issue, IssueKey};
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;

/// IssueSource port for reading issues from a tracker
///
/// This port abstracts the tracker client (REST API, local documents, cache).
/// The core never builds requests or queries itself; it only asks for issues
/// by key or by an opaque query string.
///
/// # Async Support
/// Methods are async so that fetches can be bounded by a timeout and, when
/// requested, overlapped. Implementations must be `Send + Sync`.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetches a single issue by key
    ///
    /// # Errors
    /// Returns `BlockersError::IssueNotFound` if the key does not exist,
    /// `BlockersError::TransientFetch` for network/timeout conditions and
    /// `BlockersError::FetchFailed` for any other tracker failure.
    async fn fetch(&self, key: &IssueKey) -> Result<Issue>;

    /// Returns every issue matching `query`
    ///
    /// The query syntax belongs to the implementation (e.g. JQL for Jira).
    async fn search(&self, query: &str) -> Result<Vec<Issue>>;

    /// Total time one `fetch` may take when each attempt is limited to
    /// `attempt_timeout`
    ///
    /// Sources that retry internally widen this so that every attempt and
    /// the backoff between them fit inside the caller's deadline.
    fn fetch_budget(&self, attempt_timeout: Duration) -> Duration {
        attempt_timeout
    }
}
