//! Naming and writing numbered exercise files

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// How exercise numbers are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// 1-based position in the weight-sorted series
    #[default]
    Position,
    /// The post's own weight
    Weight,
}

/// Turn a post title into a file name fragment.
///
/// Lowercases, drops apostrophes and quotes, and collapses every other run of
/// non-alphanumeric characters into a single `-`.
///
/// ```
/// use sql_exercises::exercises::slugify;
///
/// assert_eq!(slugify("Don't Forget to Save: Persisting Your DuckDB Database"),
///            "dont-forget-to-save-persisting-your-duckdb-database");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if matches!(ch, '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201c}' | '\u{201d}') {
            continue;
        }

        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("exercise");
    }
    slug
}

/// File extension used for a fenced block language.
pub fn extension_for(language: &str) -> &str {
    match language {
        "python" | "py" => "py",
        "sql" => "sql",
        other => other,
    }
}

/// `{ordinal:02}_{slug}`, the part shared by every file extracted from one post.
pub fn exercise_stem(ordinal: i64, slug: &str) -> String {
    format!("{:02}_{}", ordinal, slug)
}

/// File name for one query split out of a post's `sql` blocks.
///
/// Counters are 1-based. The block number only appears when the post has several blocks, and
/// the query number only when there is more than one file to tell apart.
pub fn sql_exercise_name(
    stem: &str,
    block_count: usize,
    block: usize,
    query_count: usize,
    query: usize,
) -> String {
    if block_count == 1 && query_count == 1 {
        format!("{}.sql", stem)
    } else if block_count == 1 {
        format!("{}_{}.sql", stem, query)
    } else {
        format!("{}_{}_{}.sql", stem, block, query)
    }
}

/// Outcome of writing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    Created,
    Updated,
    Unchanged,
}

/// A file written during an extraction pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub status: WriteStatus,
}

/// Writes exercise files and remembers which names the current pass has claimed.
#[derive(Debug, Default)]
pub struct ExerciseWriter {
    claimed_stems: HashSet<String>,
    written: HashSet<PathBuf>,
}

impl ExerciseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the stem for a post.
    ///
    /// When an earlier post in this pass already took `{ordinal}_{slug}`, the slug gets the first
    /// free `-2`, `-3`, ... suffix.
    pub fn claim_stem(&mut self, ordinal: i64, slug: &str) -> String {
        let mut attempt = 1;
        loop {
            let candidate = if attempt == 1 {
                exercise_stem(ordinal, slug)
            } else {
                exercise_stem(ordinal, &format!("{}-{}", slug, attempt))
            };

            if self.claimed_stems.insert(candidate.clone()) {
                return candidate;
            }
            attempt += 1;
        }
    }

    /// Write `text` verbatim to `path`, replacing whatever was there.
    pub fn write(&mut self, path: &Path, text: &str) -> Result<WrittenFile> {
        let previous = match fs::read(path) {
            Ok(bytes) => Some(checksum(&bytes)),
            Err(_) => None,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, text)
            .with_context(|| format!("Failed to write exercise file {}", path.display()))?;

        let status = match previous {
            None => WriteStatus::Created,
            Some(sum) if sum == checksum(text.as_bytes()) => WriteStatus::Unchanged,
            Some(_) => WriteStatus::Updated,
        };

        self.written.insert(path.to_path_buf());
        Ok(WrittenFile {
            path: path.to_path_buf(),
            status,
        })
    }

    /// Whether `path` was written during this pass.
    pub fn wrote(&self, path: &Path) -> bool {
        self.written.contains(path)
    }

    /// Remove `*.{extension}` files in `dir` that this pass did not write.
    pub fn prune_stale(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();

        if !dir.is_dir() {
            return Ok(removed);
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        let mut stale: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == extension))
            .filter(|path| !self.wrote(path))
            .collect();
        stale.sort();

        for path in stale {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale file {}", path.display()))?;
            removed.push(path);
        }

        Ok(removed)
    }
}

/// Hex SHA-256 of some bytes
pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
