//! blockers - render the chain of issues that transitively block an issue
//!
//! This library fetches an issue and everything reachable from it through
//! tracker links, keeps the links of the requested types, and renders the
//! ancestors (or descendants) of the root issue as a text tree. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`issue_graph`): Issue model, the graph, and pure services
//! - **Application Layer** (`application`): Use cases and request/response DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use blockers::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let issue_source = CachingIssueSource::new(DirectoryIssueSource::new("issues")?);
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = RenderBlockerTreeUseCase::new(issue_source, progress_reporter);
//!
//! // Execute
//! let request = BlockerTreeRequest::builder()
//!     .root(IssueKey::new("PROJ-123")?)
//!     .link_type("Blocks")
//!     .build()?;
//! let response = use_case.execute(request).await?;
//!
//! print!("{}", response.tree);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod issue_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        DirectoryIssueSource, FileSystemWriter, JsonSnapshotStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{CachingIssueSource, JiraIssueSource};
    pub use crate::application::dto::{
        BlockerTreeRequest, BlockerTreeRequestBuilder, BlockerTreeResponse, TreeDirection,
    };
    pub use crate::application::use_cases::{render_blocker_tree, RenderBlockerTreeUseCase};
    pub use crate::issue_graph::domain::{Issue, IssueGraph, IssueKey, Link};
    pub use crate::issue_graph::services::{
        build_issue_graph, filter_edges, format_issue, format_tree, link_type_in, project,
        BuildOptions, GraphBuilder, Projection,
    };
    pub use crate::ports::outbound::{
        GraphSnapshotStore, IssueSource, LoadedSnapshot, OutputPresenter, ProgressReporter,
    };
    pub use crate::shared::error::{BlockersError, ExitCode};
    pub use crate::shared::Result;
}
