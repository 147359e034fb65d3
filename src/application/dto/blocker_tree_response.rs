use crate::issue_graph::domain::{IssueGraph, IssueKey};

/// BlockerTreeResponse - Internal response DTO from the blocker tree use case
#[derive(Debug, Clone)]
pub struct BlockerTreeResponse {
    /// Issue the tree was rendered for
    pub root: IssueKey,
    /// Projected DAG the tree was rendered from
    pub graph: IssueGraph,
    /// Rendered tree text, ending with a newline
    pub tree: String,
    /// Length of the longest path below the root (0 for a lone root)
    pub depth: usize,
}

impl BlockerTreeResponse {
    pub fn new(root: IssueKey, graph: IssueGraph, tree: String, depth: usize) -> Self {
        Self {
            root,
            graph,
            tree,
            depth,
        }
    }

    /// Number of issues in the tree besides the root
    pub fn related_count(&self) -> usize {
        self.graph.node_count().saturating_sub(1)
    }
}
