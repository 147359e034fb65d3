use crate::issue_graph::domain::{EdgeAttributes, Issue, IssueGraph, IssueKey};
use crate::ports::outbound::{GraphSnapshotStore, LoadedSnapshot};
use crate::shared::error::BlockersError;
use crate::shared::security::{reject_symlink_target, safe_read_file, MAX_FILE_SIZE};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotMetadata {
    snapshot_id: String,
    created_at: DateTime<Utc>,
    tool_name: String,
    tool_version: String,
}

impl SnapshotMetadata {
    fn generate() -> Self {
        Self {
            snapshot_id: format!("urn:uuid:{}", Uuid::new_v4()),
            created_at: Utc::now(),
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEdge {
    from: IssueKey,
    to: IssueKey,
    link_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    metadata: SnapshotMetadata,
    root: IssueKey,
    nodes: Vec<Issue>,
    edges: Vec<SnapshotEdge>,
}

/// JsonSnapshotStore adapter persisting issue graphs as JSON files
///
/// Writes go to a temporary file in the target directory that is then
/// renamed over the destination, so a crash never leaves half a snapshot.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, details: impl Into<String>) -> BlockersError {
        BlockersError::FileWriteError {
            path: self.path.clone(),
            details: details.into(),
        }
    }

    fn read_error(&self, details: impl Into<String>) -> BlockersError {
        BlockersError::SnapshotReadError {
            path: self.path.clone(),
            details: details.into(),
        }
    }

    fn parent_dir(&self) -> Result<&Path> {
        let parent = match self.path.parent() {
            Some(p) if p != Path::new("") => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(self
                .write_error(format!("Parent directory does not exist: {}", parent.display()))
                .into());
        }
        Ok(parent)
    }
}

impl GraphSnapshotStore for JsonSnapshotStore {
    fn save(&self, graph: &IssueGraph, root: &IssueKey) -> Result<()> {
        let parent = self.parent_dir()?;
        reject_symlink_target(&self.path).map_err(|e| self.write_error(e.to_string()))?;

        let document = SnapshotDocument {
            metadata: SnapshotMetadata::generate(),
            root: root.clone(),
            nodes: graph.issues().cloned().collect(),
            edges: graph
                .edges()
                .map(|edge| SnapshotEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    link_type: edge.attributes.link_type.clone(),
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&document)?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| self.write_error(e.to_string()))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| self.write_error(e.to_string()))?;
        temp.persist(&self.path)
            .map_err(|e| self.write_error(e.error.to_string()))?;
        Ok(())
    }

    fn load(&self) -> Result<LoadedSnapshot> {
        let content = safe_read_file(&self.path, "graph snapshot", MAX_FILE_SIZE)
            .map_err(|e| self.read_error(e.to_string()))?;
        let document: SnapshotDocument =
            serde_json::from_str(&content).map_err(|e| self.read_error(e.to_string()))?;

        let mut graph = IssueGraph::new();
        for issue in document.nodes {
            graph.add_node(issue);
        }
        for edge in document.edges {
            graph
                .add_edge(&edge.from, &edge.to, EdgeAttributes::new(edge.link_type))
                .map_err(|e| self.read_error(format!("dangling edge: {}", e)))?;
        }

        if !graph.contains(&document.root) {
            return Err(self
                .read_error(format!("root {} is not among the snapshot nodes", document.root))
                .into());
        }

        Ok(LoadedSnapshot {
            root: document.root,
            graph,
        })
    }
}
