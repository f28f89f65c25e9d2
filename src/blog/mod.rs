//! Loading Hugo blog posts and their series metadata

pub mod blocks;
pub mod frontmatter;
pub mod series;

use anyhow::{bail, Result};
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use series::filter_series;

/// Weight given to posts whose front matter has none, so they sort after numbered posts.
pub const DEFAULT_WEIGHT: i64 = 999;

/// A single blog post
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Markdown file the post was read from
    pub path: PathBuf,
    /// Title from the front matter
    pub title: Option<String>,
    /// Taxonomy terms, normalized to a set whether the source held a string or a list
    pub tags: BTreeSet<String>,
    /// Ordering key within the series
    pub weight: i64,
    /// Markdown body after the front matter
    pub body: String,
}

impl Post {
    /// Build a post from raw markdown, reading its tags from the `taxonomy` front matter key.
    pub fn parse(path: impl Into<PathBuf>, content: &str, taxonomy: &str) -> Self {
        let fm = frontmatter::extract_frontmatter(content);

        Self {
            path: path.into(),
            title: fm
                .get_str("title")
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            tags: normalize_tags(fm.get(taxonomy)),
            weight: parse_weight(fm.get("weight")),
            body: fm.body().to_string(),
        }
    }

    /// Case-insensitive membership test against the normalized tag set.
    pub fn has_tag(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.tags.iter().any(|tag| tag.to_lowercase() == wanted)
    }
}

/// Normalize a taxonomy field into a set of strings.
///
/// A string becomes a one element set, a list contributes each scalar element, anything else is
/// an empty set.
pub fn normalize_tags(value: Option<&Value>) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    match value {
        Some(Value::Sequence(items)) => {
            for item in items {
                if let Some(tag) = scalar_to_string(item) {
                    tags.insert(tag);
                }
            }
        }
        Some(other) => {
            if let Some(tag) = scalar_to_string(other) {
                tags.insert(tag);
            }
        }
        None => {}
    }

    tags.retain(|tag| !tag.is_empty());
    tags
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

fn parse_weight(value: Option<&Value>) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.unwrap_or(DEFAULT_WEIGHT)
}

/// Load every post under a Hugo content directory.
///
/// Posts are either page bundles (`<dir>/<name>/index.md`) or leaf files (`<dir>/<name>.md`).
/// Section pages (`_index.md`) are ignored. Entries are visited in file name order so the
/// result does not depend on the filesystem.
pub fn load_posts(content_dir: &Path, taxonomy: &str) -> Result<Vec<Post>> {
    if !content_dir.is_dir() {
        bail!(
            "Blog content directory not found at {}",
            content_dir.display()
        );
    }

    let mut posts = Vec::new();

    let walker = WalkDir::new(content_dir)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable blog entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_post_file(entry.path(), entry.depth()) {
            continue;
        }

        let path = entry.path();
        match fs::read_to_string(path) {
            Ok(content) => {
                let post = Post::parse(path, &content, taxonomy);
                tracing::debug!(
                    path = %path.display(),
                    weight = post.weight,
                    tags = ?post.tags,
                    "loaded post"
                );
                posts.push(post);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable post");
            }
        }
    }

    Ok(posts)
}

fn is_post_file(path: &Path, depth: usize) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    match depth {
        1 => name.ends_with(".md") && name != "_index.md",
        2 => name == "index.md",
        _ => false,
    }
}

#[cfg(test)]
mod tests;
