//! Issue documents in the tracker's REST shape.
//!
//! ```json
//! {"key": "PROJ-2", "fields": {
//!     "summary": "Fix login", "status": {"name": "Open"},
//!     "assignee": {"key": "bob"}, "labels": ["auth"],
//!     "issuelinks": [{"type": {"name": "Blocks"}, "outwardIssue": {"key": "PROJ-4"}}]}}
//! ```

use crate::issue_graph::domain::{Issue, IssueKey, Link};
use crate::shared::error::BlockersError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct IssueDocument {
    key: String,
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    summary: String,
    status: StatusField,
    #[serde(default)]
    assignee: Option<UserField>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    issuelinks: Vec<IssueLinkField>,
}

#[derive(Debug, Deserialize)]
struct StatusField {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserField {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "accountId")]
    account_id: Option<String>,
}

impl UserField {
    fn display_key(self) -> Option<String> {
        self.key.or(self.name).or(self.account_id)
    }
}

#[derive(Debug, Deserialize)]
struct IssueLinkField {
    #[serde(rename = "type")]
    link_type: LinkTypeField,
    #[serde(default, rename = "inwardIssue")]
    inward_issue: Option<LinkedIssue>,
    #[serde(default, rename = "outwardIssue")]
    outward_issue: Option<LinkedIssue>,
}

#[derive(Debug, Deserialize)]
struct LinkTypeField {
    name: String,
}

#[derive(Debug, Deserialize)]
struct LinkedIssue {
    key: String,
}

impl IssueDocument {
    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Converts the raw document into a domain `Issue`.
    ///
    /// A link must name exactly one of `inwardIssue` / `outwardIssue`.
    pub(crate) fn into_issue(self) -> Result<Issue, BlockersError> {
        let key = IssueKey::new(self.key.as_str())?;
        let invalid = |details: String| BlockersError::InvalidIssueDocument {
            key: self.key.clone(),
            details,
        };

        let mut links = Vec::with_capacity(self.fields.issuelinks.len());
        for field in self.fields.issuelinks {
            let link_type = field.link_type.name;
            let link = match (field.inward_issue, field.outward_issue) {
                (Some(inward), None) => Link::inward(link_type, IssueKey::new(inward.key)?),
                (None, Some(outward)) => Link::outward(link_type, IssueKey::new(outward.key)?),
                (None, None) => {
                    return Err(invalid(format!("'{}' link has no linked issue", link_type)));
                }
                (Some(_), Some(_)) => {
                    return Err(invalid(format!(
                        "'{}' link names both an inward and an outward issue",
                        link_type
                    )));
                }
            };
            links.push(link);
        }

        let mut issue = Issue::new(key, self.fields.summary, self.fields.status.name)
            .with_labels(self.fields.labels)
            .with_links(links);
        if let Some(assignee) = self.fields.assignee.and_then(UserField::display_key) {
            issue = issue.with_assignee(assignee);
        }
        Ok(issue)
    }
}

/// Parses one issue document; `origin` names the issue in error messages.
pub(crate) fn parse_issue(json: &str, origin: &str) -> Result<Issue, BlockersError> {
    let document: IssueDocument =
        serde_json::from_str(json).map_err(|e| BlockersError::InvalidIssueDocument {
            key: origin.to_string(),
            details: e.to_string(),
        })?;
    document.into_issue()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "key": "PROJ-2",
            "fields": {
                "summary": "Fix login",
                "status": {"name": "In Progress"},
                "assignee": {"key": "bob", "displayName": "Bob"},
                "labels": ["auth", "backend"],
                "issuelinks": [
                    {"type": {"name": "Blocks"}, "outwardIssue": {"key": "PROJ-4"}},
                    {"type": {"name": "Blocks"}, "inwardIssue": {"key": "PROJ-1"}},
                    {"type": {"name": "Relates"}, "outwardIssue": {"key": "OPS-7"}}
                ]
            }
        }"#;

        let issue = parse_issue(json, "PROJ-2").unwrap();

        assert_eq!(issue.key().as_str(), "PROJ-2");
        assert_eq!(issue.summary(), "Fix login");
        assert_eq!(issue.status(), "In Progress");
        assert_eq!(issue.assignee(), Some("bob"));
        assert_eq!(issue.labels(), ["auth", "backend"]);
        assert_eq!(issue.links().len(), 3);
        assert_eq!(
            issue.links()[0],
            Link::outward("Blocks", IssueKey::new("PROJ-4").unwrap())
        );
        assert_eq!(
            issue.links()[1],
            Link::inward("Blocks", IssueKey::new("PROJ-1").unwrap())
        );
    }

    #[test]
    fn test_parse_minimal_document() {
        let json = r#"{"key": "A-1", "fields": {"summary": "s", "status": {"name": "Done"}}}"#;

        let issue = parse_issue(json, "A-1").unwrap();

        assert_eq!(issue.assignee(), None);
        assert!(issue.labels().is_empty());
        assert!(issue.links().is_empty());
    }

    #[test]
    fn test_null_assignee() {
        let json = r#"{"key": "A-1", "fields": {"summary": "s", "status": {"name": "Open"}, "assignee": null}}"#;

        assert_eq!(parse_issue(json, "A-1").unwrap().assignee(), None);
    }

    #[test]
    fn test_assignee_falls_back_to_name_then_account_id() {
        let by_name = r#"{"key": "A-1", "fields": {"summary": "s", "status": {"name": "Open"},
            "assignee": {"name": "carol", "accountId": "5b10"}}}"#;
        let by_account = r#"{"key": "A-1", "fields": {"summary": "s", "status": {"name": "Open"},
            "assignee": {"accountId": "5b10"}}}"#;

        let carol = parse_issue(by_name, "A-1").unwrap();
        let account = parse_issue(by_account, "A-1").unwrap();

        assert_eq!(carol.assignee(), Some("carol"));
        assert_eq!(account.assignee(), Some("5b10"));
    }

    #[test]
    fn test_link_without_issue_rejected() {
        let json = r#"{"key": "A-1", "fields": {"summary": "s", "status": {"name": "Open"},
            "issuelinks": [{"type": {"name": "Blocks"}}]}}"#;

        let err = parse_issue(json, "A-1").unwrap_err();

        assert!(matches!(err, BlockersError::InvalidIssueDocument { .. }));
        assert!(err.to_string().contains("no linked issue"));
    }

    #[test]
    fn test_link_with_both_ends_rejected() {
        let json = r#"{"key": "A-1", "fields": {"summary": "s", "status": {"name": "Open"},
            "issuelinks": [{"type": {"name": "Blocks"},
                "inwardIssue": {"key": "A-2"}, "outwardIssue": {"key": "A-3"}}]}}"#;

        let err = parse_issue(json, "A-1").unwrap_err();

        assert!(err.to_string().contains("both an inward and an outward"));
    }

    #[test]
    fn test_malformed_json_names_origin() {
        let err = parse_issue("{not json", "PROJ-9").unwrap_err();

        assert!(matches!(
            err,
            BlockersError::InvalidIssueDocument { ref key, .. } if key == "PROJ-9"
        ));
    }

    #[test]
    fn test_missing_status_rejected() {
        let json = r#"{"key": "A-1", "fields": {"summary": "s"}}"#;

        assert!(parse_issue(json, "A-1").is_err());
    }

    #[test]
    fn test_invalid_linked_key_rejected() {
        let json = r#"{"key": "A-1", "fields": {"summary": "s", "status": {"name": "Open"},
            "issuelinks": [{"type": {"name": "Blocks"}, "outwardIssue": {"key": "../etc"}}]}}"#;

        assert!(matches!(
            parse_issue(json, "A-1"),
            Err(BlockersError::InvalidIssueKey { .. })
        ));
    }
}
