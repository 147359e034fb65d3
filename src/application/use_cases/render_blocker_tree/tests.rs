use super::*;
use crate::issue_graph::domain::Link;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// Mock implementations for testing
struct MockIssueSource {
    issues: HashMap<IssueKey, Issue>,
    fetch_count: AtomicUsize,
}

impl MockIssueSource {
    fn new(issues: Vec<Issue>) -> Self {
        Self {
            issues: issues.into_iter().map(|i| (i.key().clone(), i)).collect(),
            fetch_count: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl IssueSource for MockIssueSource {
    async fn fetch(&self, key: &IssueKey) -> Result<Issue> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.issues.get(key).cloned().ok_or_else(|| {
            BlockersError::IssueNotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<Issue>> {
        Ok(self
            .issues
            .values()
            .filter(|issue| issue.summary().contains(query))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct MockProgressReporter {
    messages: Mutex<Vec<String>>,
}

impl MockProgressReporter {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.messages.lock().unwrap().push(format!(
            "Progress: {}/{} - {}",
            current,
            total,
            message.unwrap_or_default()
        ));
    }

    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Completed: {}", message));
    }
}

fn key(s: &str) -> IssueKey {
    IssueKey::new(s).unwrap()
}

/// Issues with symmetric links built from `(from, to, type)` triples
fn tracker(issues: &[(&str, &str, &str)], links: &[(&str, &str, &str)]) -> MockIssueSource {
    let mut by_key: HashMap<&str, Vec<Link>> = HashMap::new();
    for (from, to, link_type) in links {
        by_key
            .entry(*from)
            .or_default()
            .push(Link::outward(*link_type, key(to)));
        by_key
            .entry(*to)
            .or_default()
            .push(Link::inward(*link_type, key(from)));
    }

    MockIssueSource::new(
        issues
            .iter()
            .map(|(k, summary, status)| {
                Issue::new(key(k), *summary, *status)
                    .with_links(by_key.remove(k).unwrap_or_default())
            })
            .collect(),
    )
}

fn request(root: &str) -> BlockerTreeRequest {
    BlockerTreeRequest::builder()
        .root(key(root))
        .build()
        .unwrap()
}

type TestUseCase = RenderBlockerTreeUseCase<MockIssueSource, MockProgressReporter>;

fn use_case(source: MockIssueSource) -> TestUseCase {
    RenderBlockerTreeUseCase::new(source, MockProgressReporter::default())
}

#[tokio::test]
async fn test_execute_renders_blockers_of_root() {
    let source = tracker(
        &[
            ("A", "Upgrade auth library", "Open"),
            ("B", "Fix login", "In Progress"),
            ("C", "Write docs", "Open"),
            ("D", "Ship release", "Open"),
        ],
        &[
            ("A", "B", "Blocks"),
            ("A", "C", "Blocks"),
            ("B", "D", "Blocks"),
        ],
    );

    let response = use_case(source).execute(request("D")).await.unwrap();

    assert_eq!(
        response.tree,
        "D: Ship release - Open\n\
         └── B: Fix login - In Progress\n    \
             └── A: Upgrade auth library - Open\n"
    );
    assert_eq!(response.depth, 2);
    assert_eq!(response.related_count(), 2);
}

#[tokio::test]
async fn test_execute_descendants() {
    let source = tracker(
        &[("A", "a", "Open"), ("B", "b", "Open"), ("C", "c", "Open")],
        &[("A", "B", "Blocks"), ("A", "C", "Blocks")],
    );
    let request = BlockerTreeRequest::builder()
        .root(key("A"))
        .direction(TreeDirection::Descendants)
        .build()
        .unwrap();

    let response = use_case(source).execute(request).await.unwrap();

    let expected = "A: a - Open\n├── B: b - Open\n└── C: c - Open\n";
    assert_eq!(response.tree, expected);
}

#[tokio::test]
async fn test_unblocked_root_renders_single_line() {
    let source = tracker(
        &[("R", "Lonely", "Done"), ("X", "x", "Open")],
        &[("R", "X", "Relates")],
    );

    let response = use_case(source).execute(request("R")).await.unwrap();

    assert_eq!(response.tree, "R: Lonely - Done\n");
    assert_eq!(response.depth, 0);
}

#[tokio::test]
async fn test_other_link_types_are_not_fetched() {
    let source = tracker(
        &[("R", "r", "Open"), ("X", "x", "Open"), ("B", "b", "Open")],
        &[("R", "X", "Relates"), ("B", "R", "Blocks")],
    );
    let use_case = use_case(source);

    let graph = use_case.build_graph(&request("R")).await.unwrap();

    assert!(!graph.contains(&key("X")));
    assert_eq!(use_case.issue_source.fetch_count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cycle_is_reported_as_not_a_dag() {
    let source = tracker(
        &[("A", "a", "Open"), ("B", "b", "Open")],
        &[("A", "B", "Blocks"), ("B", "A", "Blocks")],
    );

    let err = use_case(source).execute(request("A")).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BlockersError>(),
        Some(BlockersError::NotADag { .. })
    ));
}

#[tokio::test]
async fn test_cycle_in_other_link_type_is_ignored() {
    let source = tracker(
        &[("A", "a", "Open"), ("B", "b", "Open")],
        &[("A", "B", "Blocks"), ("B", "A", "Relates")],
    );
    let graph_request = BlockerTreeRequest::builder()
        .root(key("B"))
        .link_types(["Blocks", "Relates"])
        .build()
        .unwrap();
    let use_case = use_case(source);
    let graph = use_case.build_graph(&graph_request).await.unwrap();

    let response = use_case.render(&graph, &request("B")).unwrap();

    assert_eq!(response.tree, "B: b - Open\n└── A: a - Open\n");
}

#[tokio::test]
async fn test_missing_root_is_fetch_failure() {
    let source = tracker(&[("A", "a", "Open")], &[]);
    let use_case = use_case(source);

    let err = use_case.execute(request("NOPE-1")).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BlockersError>(),
        Some(BlockersError::IssueNotFound { .. })
    ));
    assert!(use_case
        .progress_reporter
        .messages()
        .iter()
        .any(|m| m.starts_with("Error:")));
}

#[tokio::test]
async fn test_render_root_missing_from_graph() {
    let use_case = use_case(tracker(&[], &[]));

    let err = use_case
        .render(&IssueGraph::new(), &request("P-1"))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BlockersError>(),
        Some(BlockersError::NodeNotFound { .. })
    ));
}

#[tokio::test]
async fn test_execute_without_root_is_rejected() {
    let use_case = use_case(tracker(&[], &[]));
    let request = BlockerTreeRequest::builder().build().unwrap();

    let err = use_case.execute(request).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BlockersError>(),
        Some(BlockersError::InvalidConfig { .. })
    ));
}

#[tokio::test]
async fn test_execute_for_query_renders_one_tree_per_hit() {
    let source = tracker(
        &[
            ("P-10", "release two", "Open"),
            ("P-2", "release one", "Open"),
            ("P-1", "blocker", "Open"),
        ],
        &[("P-1", "P-2", "Blocks"), ("P-1", "P-10", "Blocks")],
    );
    let use_case = use_case(source);
    let template = BlockerTreeRequest::builder().build().unwrap();

    let responses = use_case
        .execute_for_query("release", template)
        .await
        .unwrap();

    let roots: Vec<&str> = responses.iter().map(|r| r.root.as_str()).collect();
    assert_eq!(roots, vec!["P-2", "P-10"]);
    let expected = "P-10: release two - Open\n└── P-1: blocker - Open\n";
    assert_eq!(responses[1].tree, expected);
}

#[tokio::test]
async fn test_execute_for_query_without_hits() {
    let use_case = use_case(tracker(&[("P-1", "x", "Open")], &[]));
    let template = BlockerTreeRequest::builder().build().unwrap();

    let responses = use_case
        .execute_for_query("nothing", template)
        .await
        .unwrap();

    assert!(responses.is_empty());
}

#[tokio::test]
async fn test_progress_is_reported_per_fetch() {
    let source = tracker(
        &[("A", "a", "Open"), ("B", "b", "Open")],
        &[("A", "B", "Blocks")],
    );
    let use_case = use_case(source);

    use_case.execute(request("B")).await.unwrap();

    let messages = use_case.progress_reporter.messages();
    assert!(messages.iter().any(|m| m == "Progress: 1/1 - A"));
    assert!(messages
        .iter()
        .any(|m| m == "Completed: ✅ Fetched 2 issue(s) with 1 link(s)"));
}
