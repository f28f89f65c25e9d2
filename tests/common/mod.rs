#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp dir holding a database file path that does not exist yet
pub struct TempDbFile {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn temp_db_file() -> TempDbFile {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.duckdb");
    TempDbFile { _dir: dir, path }
}

/// Write `contents` to `name` inside `dir` and return the full path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Write a page bundle post under `<root>/content/blog/<slug>/index.md`
pub fn write_post(root: &Path, slug: &str, front_matter: &str, body: &str) -> PathBuf {
    write_file(
        root,
        &format!("content/blog/{}/index.md", slug),
        &format!("---\n{}\n---\n{}", front_matter, body),
    )
}
