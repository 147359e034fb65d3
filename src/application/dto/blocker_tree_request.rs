use super::TreeDirection;
use crate::issue_graph::domain::IssueKey;
use crate::shared::error::BlockersError;
use std::time::Duration;

/// Link type rendered when none is configured
pub const DEFAULT_LINK_TYPE: &str = "Blocks";

/// BlockerTreeRequest - Internal request DTO for the blocker tree use case
///
/// Built through [`BlockerTreeRequest::builder`], which validates the
/// options once so the use case can rely on them.
#[derive(Debug, Clone)]
pub struct BlockerTreeRequest {
    /// Issue the tree is rendered for; absent for query runs until a hit is picked
    pub root: Option<IssueKey>,
    /// Link types that are followed while fetching and kept in the tree
    pub link_types: Vec<String>,
    /// Whether blockers (ancestors) or blocked issues (descendants) are shown
    pub direction: TreeDirection,
    /// Maximum number of fetches in flight
    pub concurrency: usize,
    /// Upper bound for a single fetch
    pub fetch_timeout: Option<Duration>,
}

impl BlockerTreeRequest {
    pub fn builder() -> BlockerTreeRequestBuilder {
        BlockerTreeRequestBuilder::default()
    }

    /// Same options, rendered for another root
    pub fn with_root(&self, root: IssueKey) -> Self {
        Self {
            root: Some(root),
            ..self.clone()
        }
    }

    /// The root issue, or an error when none was given
    pub fn require_root(&self) -> Result<&IssueKey, BlockersError> {
        self.root.as_ref().ok_or_else(|| BlockersError::InvalidConfig {
            message: "no root issue given; pass an issue key or --query".to_string(),
        })
    }
}

/// Builder for [`BlockerTreeRequest`]
#[derive(Debug, Clone, Default)]
pub struct BlockerTreeRequestBuilder {
    root: Option<IssueKey>,
    link_types: Vec<String>,
    direction: TreeDirection,
    concurrency: Option<usize>,
    fetch_timeout: Option<Duration>,
}

impl BlockerTreeRequestBuilder {
    pub fn root(mut self, root: IssueKey) -> Self {
        self.root = Some(root);
        self
    }

    pub fn link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_types.push(link_type.into());
        self
    }

    pub fn link_types<I, T>(mut self, link_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.link_types.extend(link_types.into_iter().map(Into::into));
        self
    }

    pub fn direction(mut self, direction: TreeDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Validates the options and builds the request
    ///
    /// # Errors
    /// `InvalidConfig` for an empty link type name, a zero concurrency or a
    /// zero timeout.
    pub fn build(self) -> Result<BlockerTreeRequest, BlockersError> {
        let mut link_types = Vec::with_capacity(self.link_types.len());
        for link_type in self.link_types {
            let trimmed = link_type.trim();
            if trimmed.is_empty() {
                return Err(BlockersError::InvalidConfig {
                    message: "link type names must not be empty".to_string(),
                });
            }
            if !link_types.iter().any(|known| known == trimmed) {
                link_types.push(trimmed.to_string());
            }
        }
        if link_types.is_empty() {
            link_types.push(DEFAULT_LINK_TYPE.to_string());
        }

        let concurrency = self.concurrency.unwrap_or(1);
        if concurrency == 0 {
            return Err(BlockersError::InvalidConfig {
                message: "concurrency must be at least 1".to_string(),
            });
        }

        if self.fetch_timeout.is_some_and(|t| t.is_zero()) {
            return Err(BlockersError::InvalidConfig {
                message: "timeout must be greater than zero".to_string(),
            });
        }

        Ok(BlockerTreeRequest {
            root: self.root,
            link_types,
            direction: self.direction,
            concurrency,
            fetch_timeout: self.fetch_timeout,
        })
    }
}
