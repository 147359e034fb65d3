use crate::issue_graph::domain::{Issue, IssueKey};
use crate::ports::outbound::IssueSource;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

/// CachingIssueSource wraps an IssueSource and adds in-memory caching.
///
/// This adapter implements the decorator pattern: any IssueSource gains a
/// memo of fetched issues. Issues returned by `search` are cached too, so
/// rendering one tree per search hit does not refetch the hits or the
/// blockers they share. Failures are never cached.
///
/// The cache is a `DashMap` and safe for concurrent fetches.
pub struct CachingIssueSource<S: IssueSource> {
    inner: S,
    cache: Arc<DashMap<IssueKey, Issue>>,
}

impl<S: IssueSource> CachingIssueSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Number of cached issues
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<S: IssueSource> IssueSource for CachingIssueSource<S> {
    async fn fetch(&self, key: &IssueKey) -> Result<Issue> {
        if let Some(cached) = self.cache.get(key) {
            return Ok(cached.clone());
        }

        let issue = self.inner.fetch(key).await?;
        self.cache.insert(key.clone(), issue.clone());
        Ok(issue)
    }

    async fn search(&self, query: &str) -> Result<Vec<Issue>> {
        let issues = self.inner.search(query).await?;
        for issue in &issues {
            self.cache.insert(issue.key().clone(), issue.clone());
        }
        Ok(issues)
    }

    fn fetch_budget(&self, attempt_timeout: Duration) -> Duration {
        self.inner.fetch_budget(attempt_timeout)
    }
}
