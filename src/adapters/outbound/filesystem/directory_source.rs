use crate::adapters::outbound::tracker_document::parse_issue;
use crate::issue_graph::domain::{Issue, IssueKey};
use crate::ports::outbound::IssueSource;
use crate::shared::error::BlockersError;
use crate::shared::security::{safe_read_file, MAX_FILE_SIZE};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// DirectoryIssueSource adapter reading issue documents from a directory
///
/// Each issue lives in `<dir>/<KEY>.json` in the tracker's document shape,
/// which makes exported issues (or hand-written fixtures) usable offline.
pub struct DirectoryIssueSource {
    dir: PathBuf,
}

impl DirectoryIssueSource {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(BlockersError::InvalidConfig {
                message: format!("issues directory does not exist: {}", dir.display()),
            }
            .into());
        }
        Ok(Self { dir })
    }

    fn document_path(&self, key: &IssueKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read_document(&self, path: &Path, origin: &str) -> Result<Issue> {
        let content = safe_read_file(path, "issue document", MAX_FILE_SIZE)?;
        Ok(parse_issue(&content, origin)?)
    }

    /// Every `*.json` file in the directory, in name order
    fn document_paths(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list issues directory {}", self.dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Case-insensitive match of `needle` against key, summary, status and labels
fn matches_query(issue: &Issue, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    std::iter::once(issue.key().as_str())
        .chain([issue.summary(), issue.status()])
        .chain(issue.labels().iter().map(String::as_str))
        .any(|field| field.to_lowercase().contains(&needle))
}

#[async_trait]
impl IssueSource for DirectoryIssueSource {
    async fn fetch(&self, key: &IssueKey) -> Result<Issue> {
        let path = self.document_path(key);
        if !path.exists() {
            return Err(BlockersError::IssueNotFound {
                key: key.to_string(),
            }
            .into());
        }
        self.read_document(&path, key.as_str())
    }

    async fn search(&self, query: &str) -> Result<Vec<Issue>> {
        let query = query.trim();
        let mut hits = Vec::new();
        for path in self.document_paths()? {
            let origin = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let issue = self.read_document(&path, &origin)?;
            if matches_query(&issue, query) {
                hits.push(issue);
            }
        }
        hits.sort_by(|a, b| a.key().cmp(b.key()));
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_issue(dir: &Path, key: &str, summary: &str, status: &str, labels: &[&str]) {
        let document = serde_json::json!({
            "key": key,
            "fields": {
                "summary": summary,
                "status": {"name": status},
                "labels": labels,
            }
        });
        fs::write(dir.join(format!("{}.json", key)), document.to_string()).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_reads_document() {
        let temp_dir = TempDir::new().unwrap();
        write_issue(temp_dir.path(), "PROJ-1", "Ship release", "Open", &[]);
        let source = DirectoryIssueSource::new(temp_dir.path()).unwrap();

        let key = IssueKey::new("PROJ-1").unwrap();
        let issue = source.fetch(&key).await.unwrap();

        assert_eq!(issue.summary(), "Ship release");
    }

    #[tokio::test]
    async fn test_fetch_missing_document_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let source = DirectoryIssueSource::new(temp_dir.path()).unwrap();

        let err = source
            .fetch(&IssueKey::new("PROJ-404").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BlockersError>(),
            Some(BlockersError::IssueNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("PROJ-1.json"), "{ nope").unwrap();
        let source = DirectoryIssueSource::new(temp_dir.path()).unwrap();

        let key = IssueKey::new("PROJ-1").unwrap();
        let err = source.fetch(&key).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BlockersError>(),
            Some(BlockersError::InvalidIssueDocument { .. })
        ));
    }

    #[test]
    fn test_missing_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        assert!(DirectoryIssueSource::new(temp_dir.path().join("nope")).is_err());
    }

    #[tokio::test]
    async fn test_search_matches_fields_case_insensitively() {
        let temp_dir = TempDir::new().unwrap();
        write_issue(temp_dir.path(), "PROJ-10", "Upgrade auth", "Open", &[]);
        write_issue(temp_dir.path(), "PROJ-9", "Write docs", "Done", &["AUTH"]);
        write_issue(temp_dir.path(), "PROJ-3", "Unrelated", "Open", &[]);
        fs::write(temp_dir.path().join("notes.txt"), "auth").unwrap();
        let source = DirectoryIssueSource::new(temp_dir.path()).unwrap();

        let hits = source.search("Auth").await.unwrap();

        let keys: Vec<&str> = hits.iter().map(|i| i.key().as_str()).collect();
        assert_eq!(keys, vec!["PROJ-9", "PROJ-10"]);
    }

    #[tokio::test]
    async fn test_search_by_status() {
        let temp_dir = TempDir::new().unwrap();
        write_issue(temp_dir.path(), "PROJ-1", "One", "In Progress", &[]);
        write_issue(temp_dir.path(), "PROJ-2", "Two", "Open", &[]);
        let source = DirectoryIssueSource::new(temp_dir.path()).unwrap();

        let hits = source.search("in progress").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key().as_str(), "PROJ-1");
    }

    #[test]
    fn test_matches_query_on_key() {
        let issue = Issue::new(IssueKey::new("OPS-7").unwrap(), "x", "Open");
        assert!(matches_query(&issue, "ops-"));
        assert!(!matches_query(&issue, "proj"));
    }
}
