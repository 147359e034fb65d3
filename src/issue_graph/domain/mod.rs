pub mod issue;
pub mod issue_graph;
pub mod issue_key;

pub use issue::{Issue, Link};
pub use issue_graph::{Edge, EdgeAttributes, IssueGraph};
pub use issue_key::IssueKey;
