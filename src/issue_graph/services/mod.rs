pub mod dag_projector;
pub mod edge_filter;
pub mod graph_builder;
pub mod issue_formatter;
pub mod tree_renderer;

pub use dag_projector::{ancestors_dag, assert_dag, descendants_dag, project, Projection};
pub use edge_filter::{filter_edges, link_type_in};
pub use graph_builder::{build_issue_graph, BuildOptions, FetchCallback, GraphBuilder};
pub use issue_formatter::format_issue;
pub use tree_renderer::{dfs_tree, format_tree, DfsTree, TreeLines, TreeNode};
