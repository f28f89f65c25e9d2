//! Tests for the extraction, listing and verification commands


use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::config::ProjectConfig;

/// A throwaway Hugo blog plus output directories inside one temp dir
pub(crate) struct FakeBlog {
    pub dir: tempfile::TempDir,
}

impl FakeBlog {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content").join("blog")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content/blog/<name>/index.md`
    pub fn bundle(&self, name: &str, front_matter: &str, body: &str) -> PathBuf {
        let dir = self.root().join("content").join("blog").join(name);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("index.md");
        fs::write(&path, format!("---\n{}\n---\n{}", front_matter, body)).unwrap();
        path
    }

    /// Defaults, but writing into this blog's temp dir
    pub fn config(&self) -> ProjectConfig {
        ProjectConfig {
            output_dir: self.root().join("exercises"),
            sql_dir: self.root().join("sql"),
            ..ProjectConfig::default()
        }
    }

    pub fn exercise(&self, name: &str) -> PathBuf {
        self.root().join("exercises").join(name)
    }

    pub fn sql(&self, name: &str) -> PathBuf {
        self.root().join("sql").join(name)
    }

    /// Sorted file names in `exercises/` or `sql/`
    pub fn listing(&self, sub: &str) -> Vec<String> {
        let dir = self.root().join(sub);
        if !dir.is_dir() {
            return Vec::new();
        }
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub(crate) const SERIES_TAGS: &str = "series: [\"SQL for Python Developers\", \"beginner\"]";
