use crate::issue_graph::domain::{EdgeAttributes, Issue, IssueGraph, IssueKey};
use crate::ports::outbound::IssueSource;
use crate::shared::error::BlockersError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Duration;

/// Callback invoked after every fetch with `(fetched, discovered, key)`
pub type FetchCallback<'a> = Box<dyn Fn(usize, usize, &IssueKey) + 'a>;

/// Options controlling how far and how fast the builder traverses links
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Link types allowed to trigger a fetch; `None` follows every type
    pub follow_link_types: Option<BTreeSet<String>>,
    /// Maximum number of fetches in flight at once
    pub concurrency: usize,
    /// Upper bound for a single fetch attempt; sources that retry get the
    /// wider budget reported by `IssueSource::fetch_budget`
    pub fetch_timeout: Option<Duration>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            follow_link_types: None,
            concurrency: 1,
            fetch_timeout: None,
        }
    }
}

impl BuildOptions {
    pub fn follow<I, T>(mut self, link_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.follow_link_types = Some(link_types.into_iter().map(Into::into).collect());
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }
}

/// GraphBuilder service discovering linked issues breadth-first
///
/// Starting from an already fetched root, every link of every dequeued issue
/// is inspected. A neighbour that has not been seen is fetched (once) and
/// enqueued, provided its link type is followed. An edge is recorded for
/// every link whose two endpoints are nodes, so links of other types still
/// show up between issues reached some other way.
///
/// Only this coordinating loop touches the `seen` set, which keeps the
/// at-most-one-fetch-per-key guarantee when several fetches overlap.
pub struct GraphBuilder<'a, S: ?Sized> {
    source: &'a S,
    options: BuildOptions,
    on_fetch: Option<FetchCallback<'a>>,
}

impl<'a, S> GraphBuilder<'a, S>
where
    S: IssueSource + ?Sized,
{
    pub fn new(source: &'a S, options: BuildOptions) -> Self {
        Self {
            source,
            options,
            on_fetch: None,
        }
    }

    /// Registers a callback for fetch progress
    pub fn on_fetch(mut self, callback: impl Fn(usize, usize, &IssueKey) + 'a) -> Self {
        self.on_fetch = Some(Box::new(callback));
        self
    }

    /// Builds the graph of issues linked (transitively) to `root`
    ///
    /// # Errors
    /// Any fetch failure is returned unchanged; no partial graph is produced.
    pub async fn build(&self, root: Issue) -> Result<IssueGraph> {
        let mut graph = IssueGraph::new();
        let mut seen: HashSet<IssueKey> = HashSet::new();
        let mut queue: VecDeque<Issue> = VecDeque::new();
        let mut fetched = 0;

        seen.insert(root.key().clone());
        graph.add_node(root.clone());
        queue.push_back(root);

        while let Some(head) = queue.pop_front() {
            let mut discovered = Vec::new();
            for link in head.links() {
                if self.follows(link.link_type()) && seen.insert(link.other_key().clone()) {
                    discovered.push(link.other_key().clone());
                }
            }

            let mut fetches = stream::iter(discovered)
                .map(|key| self.fetch_one(key))
                .buffered(self.options.concurrency.max(1));

            while let Some(result) = fetches.next().await {
                let issue = result?;
                fetched += 1;
                if let Some(callback) = &self.on_fetch {
                    callback(fetched, seen.len() - 1, issue.key());
                }
                graph.add_node(issue.clone());
                queue.push_back(issue);
            }

            for link in head.links() {
                let (from, to) = link.endpoints(head.key());
                if graph.contains(from) && graph.contains(to) {
                    graph.add_edge(from, to, EdgeAttributes::new(link.link_type()))?;
                }
            }
        }

        Ok(graph)
    }

    /// Fetches `root` and builds the graph around it
    pub async fn build_from(&self, root: &IssueKey) -> Result<IssueGraph> {
        let issue = self.fetch_one(root.clone()).await?;
        self.build(issue).await
    }

    fn follows(&self, link_type: &str) -> bool {
        self.options
            .follow_link_types
            .as_ref()
            .map_or(true, |allowed| allowed.contains(link_type))
    }

    async fn fetch_one(&self, key: IssueKey) -> Result<Issue> {
        let issue = match self.options.fetch_timeout {
            Some(limit) => {
                let budget = self.source.fetch_budget(limit);
                tokio::time::timeout(budget, self.source.fetch(&key))
                    .await
                    .map_err(|_| BlockersError::TransientFetch {
                        key: key.to_string(),
                        details: format!("no response within {} ms", budget.as_millis()),
                    })??
            }
            None => self.source.fetch(&key).await?,
        };

        if issue.key() != &key {
            return Err(BlockersError::InvalidIssueDocument {
                key: key.to_string(),
                details: format!("tracker returned issue {} instead", issue.key()),
            }
            .into());
        }

        Ok(issue)
    }
}

/// Builds the issue graph around `root` with sequential fetches
///
/// `follow_link_types` limits which link types may trigger a fetch.
pub async fn build_issue_graph<S>(
    source: &S,
    root: Issue,
    follow_link_types: Option<&[&str]>,
) -> Result<IssueGraph>
where
    S: IssueSource + ?Sized,
{
    let mut options = BuildOptions::default();
    if let Some(link_types) = follow_link_types {
        options = options.follow(link_types.iter().copied());
    }
    GraphBuilder::new(source, options).build(root).await
}
