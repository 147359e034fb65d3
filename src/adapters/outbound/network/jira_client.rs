use crate::adapters::outbound::tracker_document::IssueDocument;
use crate::issue_graph::domain::{Issue, IssueKey};
use crate::ports::outbound::IssueSource;
use crate::shared::error::BlockersError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Fields requested for every issue; the rest of the document is ignored
const ISSUE_FIELDS: &str = "summary,status,assignee,labels,issuelinks";

/// Page size used when walking search results
const SEARCH_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone)]
enum Credentials {
    Basic { user: String, token: String },
    Bearer(String),
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    issues: Vec<IssueDocument>,
}

/// JiraIssueSource adapter fetching issues from a Jira-compatible REST API
///
/// Implements the IssueSource port over `GET /rest/api/2/issue/{key}` and
/// `GET /rest/api/2/search`. HTTP failures are classified into the fetch
/// error family: 404 is `IssueNotFound`, other 4xx are `FetchFailed`, and
/// 5xx, timeouts and connection errors are `TransientFetch`.
///
/// Transient failures are retried up to `max_retries` times (0 by default).
/// The timeout given to `new` bounds each attempt separately.
pub struct JiraIssueSource {
    client: reqwest::Client,
    server: String,
    timeout: Duration,
    credentials: Option<Credentials>,
    max_retries: u32,
}

impl JiraIssueSource {
    /// Creates a client for `server` (an `http://` or `https://` base URL)
    pub fn new(server: &str, timeout: Duration) -> Result<Self> {
        let server = Self::validate_server(server)?;

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("blockers/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            server,
            timeout,
            credentials: None,
            max_retries: 0,
        })
    }

    /// Authenticates every request with HTTP basic auth (user + API token)
    pub fn with_credentials(mut self, user: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Basic {
            user: user.into(),
            token: token.into(),
        });
        self
    }

    /// Authenticates every request with a personal access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Bearer(token.into()));
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn validate_server(server: &str) -> Result<String> {
        let trimmed = server.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(BlockersError::InvalidConfig {
                message: format!("server must be an http(s) URL, got '{}'", server),
            }
            .into());
        }
        if trimmed.contains('?') || trimmed.contains('#') {
            return Err(BlockersError::InvalidConfig {
                message: format!(
                    "server URL must not carry a query or fragment: '{}'",
                    server
                ),
            }
            .into());
        }
        Ok(trimmed.to_string())
    }

    fn issue_url(&self, key: &IssueKey) -> String {
        format!(
            "{}/rest/api/2/issue/{}?fields={}",
            self.server,
            urlencoding::encode(key.as_str()),
            ISSUE_FIELDS
        )
    }

    fn search_url(&self, jql: &str, start_at: usize) -> String {
        format!(
            "{}/rest/api/2/search?jql={}&startAt={}&maxResults={}&fields={}",
            self.server,
            urlencoding::encode(jql),
            start_at,
            SEARCH_PAGE_SIZE,
            ISSUE_FIELDS
        )
    }

    /// Runs `attempt` until it succeeds, fails permanently, or retries run out
    async fn with_retry<T, F, Fut>(&self, mut attempt: F) -> std::result::Result<T, BlockersError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, BlockersError>>,
    {
        let mut retries = 0;
        loop {
            match attempt().await {
                Err(BlockersError::TransientFetch { .. }) if retries < self.max_retries => {
                    retries += 1;
                    tokio::time::sleep(backoff(retries)).await;
                }
                result => return result,
            }
        }
    }

    /// Performs one GET and decodes the JSON body
    ///
    /// `subject` names what was requested (an issue key or the search query).
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        subject: &str,
    ) -> std::result::Result<T, BlockersError> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        match &self.credentials {
            Some(Credentials::Basic { user, token }) => {
                request = request.basic_auth(user, Some(token));
            }
            Some(Credentials::Bearer(token)) => request = request.bearer_auth(token),
            None => {}
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_request_error(&e, subject))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, subject));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BlockersError::InvalidIssueDocument {
                key: subject.to_string(),
                details: e.to_string(),
            })
    }
}

/// Pause before retry number `retry` (1-based)
fn backoff(retry: u32) -> Duration {
    Duration::from_millis(100 * u64::from(retry))
}

/// Offset of the next search page, or `None` once every hit has arrived
fn next_page_start(start_at: usize, received: usize, total: usize) -> Option<usize> {
    let next = start_at + received;
    (received > 0 && next < total).then_some(next)
}

/// Maps a non-success HTTP status to the fetch error family
fn classify_status(status: StatusCode, subject: &str) -> BlockersError {
    let key = subject.to_string();
    match status {
        StatusCode::NOT_FOUND => BlockersError::IssueNotFound { key },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BlockersError::FetchFailed {
            key,
            details: format!(
                "tracker rejected the credentials ({}); set BLOCKERS_API_TOKEN and --user",
                status
            ),
        },
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            BlockersError::TransientFetch {
                key,
                details: format!("tracker returned status {}", status),
            }
        }
        _ => BlockersError::FetchFailed {
            key,
            details: format!("tracker returned status {}", status),
        },
    }
}

fn classify_request_error(error: &reqwest::Error, subject: &str) -> BlockersError {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        BlockersError::TransientFetch {
            key: subject.to_string(),
            details: error.to_string(),
        }
    } else {
        BlockersError::FetchFailed {
            key: subject.to_string(),
            details: error.to_string(),
        }
    }
}

#[async_trait]
impl IssueSource for JiraIssueSource {
    async fn fetch(&self, key: &IssueKey) -> Result<Issue> {
        let url = self.issue_url(key);
        let document: IssueDocument = self
            .with_retry(|| self.get_json(&url, key.as_str()))
            .await?;
        Ok(document.into_issue()?)
    }

    async fn search(&self, query: &str) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut start_at = 0;

        loop {
            let url = self.search_url(query, start_at);
            let page: SearchPage = self.with_retry(|| self.get_json(&url, query)).await?;

            let received = page.issues.len();
            for document in page.issues {
                issues.push(document.into_issue()?);
            }

            match next_page_start(start_at, received, page.total) {
                Some(next) => start_at = next,
                None => break,
            }
        }

        Ok(issues)
    }

    fn fetch_budget(&self, attempt_timeout: Duration) -> Duration {
        let per_attempt = attempt_timeout.max(self.timeout);
        (1..=self.max_retries).fold(per_attempt, |budget, retry| {
            budget + backoff(retry) + per_attempt
        })
    }
}
