/// Mock implementations for testing
mod mock_issue_source;
mod mock_progress_reporter;

pub use mock_issue_source::MockIssueSource;
pub use mock_progress_reporter::MockProgressReporter;
