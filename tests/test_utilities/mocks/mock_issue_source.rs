use async_trait::async_trait;
use blockers::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory IssueSource with symmetric links and call counting
#[derive(Default)]
pub struct MockIssueSource {
    issues: BTreeMap<IssueKey, (String, String)>,
    links: Vec<(IssueKey, IssueKey, String)>,
    failing: HashMap<IssueKey, String>,
    fetch_count: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

fn key(s: &str) -> IssueKey {
    IssueKey::new(s).unwrap()
}

impl MockIssueSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, issue_key: &str, summary: &str, status: &str) -> Self {
        self.issues
            .insert(key(issue_key), (summary.to_string(), status.to_string()));
        self
    }

    /// `from` has an outward link of `link_type` to `to`, and `to` the inward twin
    pub fn with_link(mut self, from: &str, to: &str, link_type: &str) -> Self {
        self.links.push((key(from), key(to), link_type.to_string()));
        self
    }

    /// Fetching `issue_key` fails with a transient error
    pub fn with_failure(mut self, issue_key: &str, details: &str) -> Self {
        self.failing.insert(key(issue_key), details.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    fn issue(&self, issue_key: &IssueKey) -> Option<Issue> {
        let (summary, status) = self.issues.get(issue_key)?;
        let links = self
            .links
            .iter()
            .filter_map(|(from, to, link_type)| {
                if from == issue_key {
                    Some(Link::outward(link_type.clone(), to.clone()))
                } else if to == issue_key {
                    Some(Link::inward(link_type.clone(), from.clone()))
                } else {
                    None
                }
            })
            .collect();
        Some(Issue::new(issue_key.clone(), summary.clone(), status.clone()).with_links(links))
    }
}

#[async_trait]
impl IssueSource for MockIssueSource {
    async fn fetch(&self, issue_key: &IssueKey) -> Result<Issue> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(issue_key.to_string());

        if let Some(details) = self.failing.get(issue_key) {
            return Err(BlockersError::TransientFetch {
                key: issue_key.to_string(),
                details: details.clone(),
            }
            .into());
        }

        self.issue(issue_key).ok_or_else(|| {
            BlockersError::IssueNotFound {
                key: issue_key.to_string(),
            }
            .into()
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<Issue>> {
        Ok(self
            .issues
            .iter()
            .filter(|(_, (summary, _))| summary.contains(query))
            .filter_map(|(issue_key, _)| self.issue(issue_key))
            .collect())
    }
}
