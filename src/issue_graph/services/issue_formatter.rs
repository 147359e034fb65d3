use crate::issue_graph::domain::{IssueGraph, IssueKey};

/// Tree label for `key`: `KEY: summary - status`, plus ` (assignee)` when
/// the issue is assigned.
///
/// Keys without a node in `graph` render as the bare key.
pub fn format_issue(graph: &IssueGraph, key: &IssueKey) -> String {
    let Some(issue) = graph.issue(key) else {
        return key.to_string();
    };

    let assignee = issue
        .assignee()
        .map(|name| format!(" ({})", name))
        .unwrap_or_default();

    format!(
        "{}: {} - {}{}",
        issue.key(),
        issue.summary(),
        issue.status(),
        assignee
    )
}
