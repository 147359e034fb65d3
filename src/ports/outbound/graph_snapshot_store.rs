use crate::issue_graph::domain::{IssueGraph, IssueKey};
use crate::shared::Result;

/// A graph read back from a snapshot, with the root it was built for
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub root: IssueKey,
    pub graph: IssueGraph,
}

/// GraphSnapshotStore port for persisting a built issue graph
///
/// Snapshots let a graph be re-filtered and re-rendered offline without
/// talking to the tracker again. The storage format is an implementation
/// detail of the adapter.
pub trait GraphSnapshotStore {
    /// Stores `graph`, remembering `root` as the issue it was built from
    fn save(&self, graph: &IssueGraph, root: &IssueKey) -> Result<()>;

    /// Loads a previously stored graph
    ///
    /// # Errors
    /// Returns `BlockersError::SnapshotReadError` if the snapshot is missing
    /// or malformed.
    fn load(&self) -> Result<LoadedSnapshot>;
}
