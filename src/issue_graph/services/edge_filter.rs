use crate::issue_graph::domain::{EdgeAttributes, IssueGraph};
use std::collections::BTreeSet;

/// Returns a new graph keeping only the edges accepted by `predicate`.
///
/// Nodes left without any incident edge are dropped, so unrelated issues
/// never show up in a rendered tree. The input graph is not modified, and
/// filtering twice with the same predicate gives the same graph as once.
pub fn filter_edges<P>(predicate: P, graph: &IssueGraph) -> IssueGraph
where
    P: Fn(&EdgeAttributes) -> bool,
{
    let kept: Vec<_> = graph
        .edges()
        .filter(|edge| predicate(edge.attributes))
        .collect();

    let mut filtered = IssueGraph::new();
    for edge in &kept {
        for key in [edge.from, edge.to] {
            if let Some(issue) = graph.issue(key) {
                filtered.add_node(issue.clone());
            }
        }
    }
    for edge in kept {
        // endpoints were added above
        let _ = filtered.add_edge(edge.from, edge.to, edge.attributes.clone());
    }
    filtered
}

/// Predicate accepting edges whose link type is one of `link_types`
pub fn link_type_in<I, T>(link_types: I) -> impl Fn(&EdgeAttributes) -> bool
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let allowed: BTreeSet<String> = link_types.into_iter().map(Into::into).collect();
    move |attributes| allowed.contains(&attributes.link_type)
}
