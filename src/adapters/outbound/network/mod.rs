/// Network adapters for issue tracker access
mod caching_issue_source;
mod jira_client;

pub use caching_issue_source::CachingIssueSource;
pub use jira_client::JiraIssueSource;
