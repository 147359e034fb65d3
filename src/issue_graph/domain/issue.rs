use super::IssueKey;
use serde::{Deserialize, Serialize};

/// A typed, directed link attached to an issue
///
/// The direction is decided once, when the tracker document is parsed:
/// an outward link makes the owning issue the source of the relationship
/// ("PROJ-1 blocks PROJ-2"), an inward link makes it the target
/// ("PROJ-2 is blocked by PROJ-1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum Link {
    Outward { link_type: String, target: IssueKey },
    Inward { link_type: String, source: IssueKey },
}

impl Link {
    pub fn outward(link_type: impl Into<String>, target: IssueKey) -> Self {
        Link::Outward {
            link_type: link_type.into(),
            target,
        }
    }

    pub fn inward(link_type: impl Into<String>, source: IssueKey) -> Self {
        Link::Inward {
            link_type: link_type.into(),
            source,
        }
    }

    pub fn link_type(&self) -> &str {
        match self {
            Link::Outward { link_type, .. } | Link::Inward { link_type, .. } => link_type,
        }
    }

    /// The issue at the other end of the link
    pub fn other_key(&self) -> &IssueKey {
        match self {
            Link::Outward { target, .. } => target,
            Link::Inward { source, .. } => source,
        }
    }

    /// Edge endpoints `(source, target)` for this link as seen from `owner`.
    pub fn endpoints<'a>(&'a self, owner: &'a IssueKey) -> (&'a IssueKey, &'a IssueKey) {
        match self {
            Link::Outward { target, .. } => (owner, target),
            Link::Inward { source, .. } => (source, owner),
        }
    }
}

/// Issue value object: an issue as fetched from the tracker
///
/// Issues are never mutated after parsing; the graph owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    key: IssueKey,
    summary: String,
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assignee: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    links: Vec<Link>,
}

impl Issue {
    pub fn new(key: IssueKey, summary: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            key,
            summary: summary.into(),
            status: status.into(),
            assignee: None,
            labels: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    pub fn key(&self) -> &IssueKey {
        &self.key
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }
}
