use crate::shared::error::BlockersError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Maximum length for issue keys (security limit)
const MAX_ISSUE_KEY_LENGTH: usize = 255;

/// NewType wrapper for a tracker issue key (e.g. `PROJ-123`) with validation
///
/// Keys end up in request URLs and file names, so only ASCII alphanumerics,
/// hyphens, underscores and dots are accepted.
///
/// Ordering is "natural": `PROJ-9` sorts before `PROJ-10`. Every key is
/// compared through the same sort key (see `sort_key`), so mixed forms such
/// as `A-9` and `A-5x` still get a total order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueKey(String);

impl IssueKey {
    pub fn new(key: impl Into<String>) -> Result<Self, BlockersError> {
        let key = key.into();
        let invalid = |reason: &str| BlockersError::InvalidIssueKey {
            key: key.clone(),
            reason: reason.to_string(),
        };

        if key.is_empty() {
            return Err(invalid("issue key cannot be empty"));
        }

        if key.len() > MAX_ISSUE_KEY_LENGTH {
            return Err(invalid(&format!(
                "issue key is too long ({} bytes, maximum {})",
                key.len(),
                MAX_ISSUE_KEY_LENGTH
            )));
        }

        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(invalid(
                "only ASCII letters, digits, hyphens, underscores and dots are allowed",
            ));
        }

        if key.contains("..") {
            return Err(invalid("'..' is not allowed"));
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits `PROJ-123` into `("PROJ", 123)`.
    fn project_and_number(&self) -> Option<(&str, u64)> {
        let (project, number) = self.0.rsplit_once('-')?;
        let is_number = !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit());
        if project.is_empty() || !is_number {
            return None;
        }
        number.parse().ok().map(|n| (project, n))
    }

    /// `(prefix, number, key)`; keys without a numeric suffix use the whole
    /// key as prefix and no number.
    fn sort_key(&self) -> (&str, Option<u64>, &str) {
        match self.project_and_number() {
            Some((project, number)) => (project, Some(number), &self.0),
            None => (&self.0, None, &self.0),
        }
    }
}

impl Ord for IssueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for IssueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for IssueKey {
    type Error = BlockersError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueKey> for String {
    fn from(key: IssueKey) -> Self {
        key.0
    }
}

impl std::str::FromStr for IssueKey {
    type Err = BlockersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for IssueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
