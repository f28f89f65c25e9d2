use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::exercises::Numbering;
use crate::DEFAULT_SERIES;

/// Name of the project configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "exercises.yaml";

/// Project configuration, read from `exercises.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Series whose posts become exercises
    #[serde(default = "default_series")]
    pub series: String,

    /// Post directory, relative to the blog root
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Front matter key holding the series terms
    #[serde(default = "default_taxonomy")]
    pub taxonomy: String,

    /// Fenced block language written as the main exercise file
    #[serde(default = "default_language")]
    pub language: String,

    /// Where main exercise files go
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Where split SQL exercises go
    #[serde(default = "default_sql_dir")]
    pub sql_dir: PathBuf,

    /// How exercise numbers are assigned
    #[serde(default)]
    pub numbering: Numbering,

    /// Whether `sql` blocks are extracted too
    #[serde(default = "default_true")]
    pub extract_sql: bool,
}

fn default_series() -> String {
    DEFAULT_SERIES.to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content").join("blog")
}

fn default_taxonomy() -> String {
    "series".to_string()
}

fn default_language() -> String {
    "python".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exercises")
}

fn default_sql_dir() -> PathBuf {
    PathBuf::from("sql")
}

fn default_true() -> bool {
    true
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            series: default_series(),
            content_dir: default_content_dir(),
            taxonomy: default_taxonomy(),
            language: default_language(),
            output_dir: default_output_dir(),
            sql_dir: default_sql_dir(),
            numbering: Numbering::default(),
            extract_sql: default_true(),
        }
    }
}

impl ProjectConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Reads the configuration file from the specified path, or looks for `exercises.yaml` in the
/// current directory.
///
/// An explicit path that does not exist is an error. A missing `exercises.yaml` just means the
/// defaults apply.
pub fn read_config(config_path: Option<&Path>) -> Result<ProjectConfig> {
    let path = match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found at: {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let candidate = std::env::current_dir()?.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(ProjectConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    ProjectConfig::from_yaml(&content)
        .with_context(|| format!("Invalid configuration file: {}", path.display()))
}
