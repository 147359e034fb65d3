//! Adjacency-map graph of issues.
//!
//! Nodes are issue keys owning their `Issue`; edges are ordered key pairs
//! carrying `EdgeAttributes`. Both adjacency directions are kept so that
//! predecessor and successor lookups are equally cheap. Maps are ordered by
//! `IssueKey`, which makes every traversal deterministic.

use super::{Issue, IssueKey};
use crate::shared::error::BlockersError;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Attributes attached to an edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeAttributes {
    pub link_type: String,
}

impl EdgeAttributes {
    pub fn new(link_type: impl Into<String>) -> Self {
        Self {
            link_type: link_type.into(),
        }
    }
}

/// Borrowed view of one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub from: &'a IssueKey,
    pub to: &'a IssueKey,
    pub attributes: &'a EdgeAttributes,
}

/// Directed graph of issue keys
///
/// No duplicate nodes and no parallel edges: adding an edge that already
/// exists replaces its attributes. Cycles are allowed here; the DAG
/// projector is the place that rejects them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueGraph {
    nodes: BTreeMap<IssueKey, Issue>,
    successors: BTreeMap<IssueKey, BTreeMap<IssueKey, EdgeAttributes>>,
    predecessors: BTreeMap<IssueKey, BTreeSet<IssueKey>>,
}

impl IssueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node for `issue` unless one with the same key exists.
    ///
    /// Returns `true` when the node was inserted.
    pub fn add_node(&mut self, issue: Issue) -> bool {
        if self.nodes.contains_key(issue.key()) {
            return false;
        }
        let key = issue.key().clone();
        self.successors.entry(key.clone()).or_default();
        self.predecessors.entry(key.clone()).or_default();
        self.nodes.insert(key, issue);
        true
    }

    /// Adds (or relabels) the edge `from -> to`.
    ///
    /// # Errors
    /// Returns `NodeNotFound` if either endpoint is not a node.
    pub fn add_edge(
        &mut self,
        from: &IssueKey,
        to: &IssueKey,
        attributes: EdgeAttributes,
    ) -> Result<(), BlockersError> {
        for key in [from, to] {
            if !self.nodes.contains_key(key) {
                return Err(BlockersError::NodeNotFound {
                    key: key.to_string(),
                });
            }
        }

        self.successors
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), attributes);
        self.predecessors
            .entry(to.clone())
            .or_default()
            .insert(from.clone());
        Ok(())
    }

    pub fn contains(&self, key: &IssueKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// The issue stored on node `key`
    pub fn issue(&self, key: &IssueKey) -> Option<&Issue> {
        self.nodes.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &IssueKey> {
        self.nodes.keys()
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Keys with an edge into `key`, in key order
    pub fn predecessors(&self, key: &IssueKey) -> Vec<&IssueKey> {
        self.predecessors
            .get(key)
            .map(|preds| preds.iter().collect())
            .unwrap_or_default()
    }

    /// Keys with an edge out of `key`, in key order
    pub fn successors(&self, key: &IssueKey) -> Vec<&IssueKey> {
        self.successors
            .get(key)
            .map(|succs| succs.keys().collect())
            .unwrap_or_default()
    }

    pub fn edge(&self, from: &IssueKey, to: &IssueKey) -> Option<&EdgeAttributes> {
        self.successors.get(from)?.get(to)
    }

    /// All edges, ordered by source then target
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.successors.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |(to, attributes)| Edge {
                from,
                to,
                attributes,
            })
        })
    }

    /// Every node with a directed path to `key`, excluding `key` itself
    /// unless it sits on a cycle.
    pub fn ancestors(&self, key: &IssueKey) -> BTreeSet<IssueKey> {
        self.reachable(key, |k| self.predecessors(k))
    }

    /// Every node reachable from `key`, excluding `key` itself unless it
    /// sits on a cycle.
    pub fn descendants(&self, key: &IssueKey) -> BTreeSet<IssueKey> {
        self.reachable(key, |k| self.successors(k))
    }

    fn reachable<'a, F>(&'a self, start: &IssueKey, next: F) -> BTreeSet<IssueKey>
    where
        F: Fn(&IssueKey) -> Vec<&'a IssueKey>,
    {
        let mut found = BTreeSet::new();
        let mut queue: VecDeque<&IssueKey> = next(start).into_iter().collect();

        while let Some(current) = queue.pop_front() {
            if found.insert(current.clone()) {
                queue.extend(next(current));
            }
        }

        found
    }

    /// New graph with the nodes in `keep` and exactly the edges of this
    /// graph whose endpoints are both kept.
    pub fn induced_subgraph(&self, keep: &BTreeSet<IssueKey>) -> IssueGraph {
        let mut subgraph = IssueGraph::new();
        for key in keep {
            if let Some(issue) = self.nodes.get(key) {
                subgraph.add_node(issue.clone());
            }
        }
        for edge in self.edges() {
            if subgraph.contains(edge.from) && subgraph.contains(edge.to) {
                // both endpoints were just added, so this cannot fail
                let _ = subgraph.add_edge(edge.from, edge.to, edge.attributes.clone());
            }
        }
        subgraph
    }

    /// Checks the graph for cycles (Kahn's algorithm).
    ///
    /// # Errors
    /// Returns `NotADag` listing the nodes that could not be ordered, i.e.
    /// the nodes on a cycle or downstream of one.
    pub fn validate_dag(&self) -> Result<(), BlockersError> {
        let mut in_degree: BTreeMap<&IssueKey, usize> = self
            .nodes
            .keys()
            .map(|key| (key, self.predecessors.get(key).map_or(0, BTreeSet::len)))
            .collect();

        let mut ready: VecDeque<&IssueKey> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(key, _)| *key)
            .collect();

        let mut ordered = 0;
        while let Some(key) = ready.pop_front() {
            ordered += 1;
            for succ in self.successors(key) {
                if let Some(degree) = in_degree.get_mut(succ) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(succ);
                    }
                }
            }
        }

        if ordered == self.nodes.len() {
            return Ok(());
        }

        let nodes = in_degree
            .into_iter()
            .filter(|(_, degree)| *degree > 0)
            .map(|(key, _)| key.to_string())
            .collect();
        Err(BlockersError::NotADag { nodes })
    }
}
