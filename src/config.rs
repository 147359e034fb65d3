//! Configuration file support for blockers.
//!
//! Provides YAML-based configuration through `blockers.config.yml` files,
//! including data structures, file loading, and validation. Command-line
//! flags take precedence over every value read here.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use blockers::application::dto::TreeDirection;
use blockers::shared::error::BlockersError;
use blockers::shared::Result;

pub const CONFIG_FILENAME: &str = "blockers.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Tracker base URL, e.g. `https://jira.example.com`
    pub server: Option<String>,
    /// Account name for basic auth (the token comes from the environment)
    pub user: Option<String>,
    pub link_types: Option<Vec<String>>,
    pub direction: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    /// Retries for transient tracker failures
    pub max_retries: Option<u32>,
    /// Read issue documents from this directory instead of a server
    pub issues_dir: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parsed `direction`, if set
    pub fn tree_direction(&self) -> Result<Option<TreeDirection>> {
        self.direction
            .as_deref()
            .map(|d| TreeDirection::from_str(d).map_err(invalid))
            .transpose()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    BlockersError::InvalidConfig {
        message: message.into(),
    }
    .into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref server) = config.server {
        if !(server.starts_with("http://") || server.starts_with("https://")) {
            return Err(invalid(format!(
                "server must be an http(s) URL, got '{}'.\n\n💡 Hint: e.g. server: https://jira.example.com",
                server
            )));
        }
    }

    if let Some(ref link_types) = config.link_types {
        for (i, link_type) in link_types.iter().enumerate() {
            if link_type.trim().is_empty() {
                return Err(invalid(format!(
                    "link_types[{}] must not be empty.\n\n💡 Hint: Use the tracker's link type name (e.g., \"Blocks\").",
                    i
                )));
            }
        }
    }

    config.tree_direction()?;

    if config.concurrency == Some(0) {
        return Err(invalid("concurrency must be at least 1"));
    }

    if config.timeout_secs == Some(0) {
        return Err(invalid("timeout_secs must be greater than zero"));
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
