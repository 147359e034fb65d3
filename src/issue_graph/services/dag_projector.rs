use crate::issue_graph::domain::{IssueGraph, IssueKey};
use crate::shared::error::BlockersError;
use std::collections::BTreeSet;

/// Which side of the root a projection keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// The root and everything with a path to it (what blocks the root)
    Ancestors,
    /// The root and everything reachable from it (what the root blocks)
    Descendants,
}

/// Fails with `NotADag` unless `graph` is acyclic.
pub fn assert_dag(graph: &IssueGraph) -> Result<(), BlockersError> {
    graph.validate_dag()
}

/// Induced subgraph of `root` and all of its ancestors.
///
/// # Errors
/// * `NotADag` if `graph` has a cycle (checked before anything else)
/// * `NodeNotFound` if `root` is not in `graph`
pub fn ancestors_dag(graph: &IssueGraph, root: &IssueKey) -> Result<IssueGraph, BlockersError> {
    project(graph, root, Projection::Ancestors)
}

/// Induced subgraph of `root` and all of its descendants.
///
/// # Errors
/// Same as [`ancestors_dag`].
pub fn descendants_dag(graph: &IssueGraph, root: &IssueKey) -> Result<IssueGraph, BlockersError> {
    project(graph, root, Projection::Descendants)
}

pub fn project(
    graph: &IssueGraph,
    root: &IssueKey,
    projection: Projection,
) -> Result<IssueGraph, BlockersError> {
    assert_dag(graph)?;

    if !graph.contains(root) {
        return Err(BlockersError::NodeNotFound {
            key: root.to_string(),
        });
    }

    let mut keep: BTreeSet<IssueKey> = match projection {
        Projection::Ancestors => graph.ancestors(root),
        Projection::Descendants => graph.descendants(root),
    };
    keep.insert(root.clone());

    let projected = graph.induced_subgraph(&keep);
    // the output must be acyclic too
    assert_dag(&projected)?;
    Ok(projected)
}
