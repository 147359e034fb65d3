use crate::application::dto::{BlockerTreeRequest, BlockerTreeResponse, TreeDirection};
use crate::issue_graph::domain::{Issue, IssueGraph, IssueKey};
use crate::issue_graph::services::{
    dfs_tree, filter_edges, format_issue, format_tree, link_type_in, project, BuildOptions,
    GraphBuilder,
};
use crate::ports::outbound::{IssueSource, ProgressReporter};
use crate::shared::error::BlockersError;
use crate::shared::Result;

/// RenderBlockerTreeUseCase - Core use case for rendering blocker trees
///
/// This use case orchestrates the workflow using generic dependency
/// injection for its infrastructure dependencies:
/// fetch the linked issues, keep the requested link types, project the DAG
/// on one side of the root, and render it as a text tree.
///
/// # Type Parameters
/// * `S` - IssueSource implementation
/// * `P` - ProgressReporter implementation
pub struct RenderBlockerTreeUseCase<S, P> {
    issue_source: S,
    progress_reporter: P,
}

impl<S, P> RenderBlockerTreeUseCase<S, P>
where
    S: IssueSource,
    P: ProgressReporter,
{
    /// Creates a new RenderBlockerTreeUseCase with injected dependencies
    pub fn new(issue_source: S, progress_reporter: P) -> Self {
        Self {
            issue_source,
            progress_reporter,
        }
    }

    /// Fetches the request's root and every issue linked to it
    ///
    /// The returned graph is unfiltered, suitable for a snapshot.
    pub async fn build_graph(&self, request: &BlockerTreeRequest) -> Result<IssueGraph> {
        let root = request.require_root()?;
        self.progress_reporter
            .report(&format!("🔎 Fetching {} and its linked issues...", root));

        let graph = self
            .graph_builder(request)
            .build_from(root)
            .await
            .inspect_err(|_| self.report_failure())?;

        self.report_graph(&graph);
        Ok(graph)
    }

    /// Filters, projects and renders `graph` around the request's root
    ///
    /// See [`render_blocker_tree`].
    pub fn render(
        &self,
        graph: &IssueGraph,
        request: &BlockerTreeRequest,
    ) -> Result<BlockerTreeResponse> {
        render_blocker_tree(graph, request)
    }

    /// Builds the graph for the request's root and renders it
    pub async fn execute(&self, request: BlockerTreeRequest) -> Result<BlockerTreeResponse> {
        let graph = self.build_graph(&request).await?;
        let response = self.render(&graph, &request)?;
        self.report_response(&response, request.direction);
        Ok(response)
    }

    /// Renders one tree per issue matching `query`, in key order
    ///
    /// Hits come back with their documents, so they are not fetched again.
    /// Wrap the source in a cache to share blockers between trees.
    pub async fn execute_for_query(
        &self,
        query: &str,
        request: BlockerTreeRequest,
    ) -> Result<Vec<BlockerTreeResponse>> {
        self.progress_reporter
            .report(&format!("🔎 Searching issues matching: {}", query));

        let mut hits: Vec<Issue> = self
            .issue_source
            .search(query)
            .await
            .inspect_err(|_| self.report_failure())?;
        hits.sort_by(|a, b| a.key().cmp(b.key()));
        hits.dedup_by(|a, b| a.key() == b.key());

        self.progress_reporter
            .report(&format!("✅ Found {} matching issue(s)", hits.len()));

        let mut responses = Vec::with_capacity(hits.len());
        for hit in hits {
            let rooted = request.with_root(hit.key().clone());
            let graph = self
                .graph_builder(&rooted)
                .build(hit)
                .await
                .inspect_err(|_| self.report_failure())?;
            let response = self.render(&graph, &rooted)?;
            self.report_response(&response, rooted.direction);
            responses.push(response);
        }

        Ok(responses)
    }

    fn graph_builder(&self, request: &BlockerTreeRequest) -> GraphBuilder<'_, S> {
        let mut options = BuildOptions::default()
            .follow(request.link_types.iter().cloned())
            .concurrency(request.concurrency);
        if let Some(timeout) = request.fetch_timeout {
            options = options.fetch_timeout(timeout);
        }

        let reporter = &self.progress_reporter;
        let on_fetch = move |fetched, discovered, key: &IssueKey| {
            reporter.report_progress(fetched, discovered, Some(key.as_str()));
        };
        let builder = GraphBuilder::new(&self.issue_source, options);
        builder.on_fetch(on_fetch)
    }

    fn report_graph(&self, graph: &IssueGraph) {
        self.progress_reporter.report_completion(&format!(
            "✅ Fetched {} issue(s) with {} link(s)",
            graph.node_count(),
            graph.edge_count()
        ));
    }

    fn report_response(&self, response: &BlockerTreeResponse, direction: TreeDirection) {
        let noun = match direction {
            TreeDirection::Ancestors => "blocker",
            TreeDirection::Descendants => "blocked issue",
        };
        self.progress_reporter.report(&format!(
            "🌲 {}: {} {}(s), depth {}",
            response.root,
            response.related_count(),
            noun,
            response.depth
        ));
    }

    fn report_failure(&self) {
        self.progress_reporter
            .report_error("❌ Failed to fetch the issue graph");
    }
}

/// Filters, projects and renders `graph` around the request's root
///
/// Needs no issue source, so saved snapshots render through it directly.
/// The root stays in the tree even when none of its links match the
/// requested types, so an unblocked issue renders as a single line.
///
/// # Errors
/// * `NodeNotFound` if the root is not in `graph`
/// * `NotADag` if the filtered links contain a cycle
pub fn render_blocker_tree(
    graph: &IssueGraph,
    request: &BlockerTreeRequest,
) -> Result<BlockerTreeResponse> {
    let root = request.require_root()?;
    let root_issue = graph.issue(root).ok_or_else(|| BlockersError::NodeNotFound {
        key: root.to_string(),
    })?;

    let mut filtered = filter_edges(link_type_in(request.link_types.iter().cloned()), graph);
    filtered.add_node(root_issue.clone());

    let projected = project(&filtered, root, request.direction.projection())?;

    let children = |key: &IssueKey| -> Vec<IssueKey> {
        let next = match request.direction {
            TreeDirection::Ancestors => projected.predecessors(key),
            TreeDirection::Descendants => projected.successors(key),
        };
        next.into_iter().cloned().collect()
    };

    let tree = format_tree(root.clone(), |key| format_issue(&projected, key), children);
    let depth = dfs_tree(root.clone(), children)
        .map(|node| node.depth)
        .max()
        .unwrap_or(0);

    Ok(BlockerTreeResponse::new(root.clone(), projected, tree, depth))
}

#[cfg(test)]
mod tests;
