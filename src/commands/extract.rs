use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::blog::blocks::{split_sql_by_comments, FenceMatcher};
use crate::blog::{filter_series, load_posts, Post};
use crate::commands::config::ProjectConfig;
use crate::exercises::{
    extension_for, slugify, sql_exercise_name, ExerciseWriter, Numbering, WriteStatus,
    WrittenFile,
};

/// Why a post produced no main exercise file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The post has no block of the configured language at all
    NoBlocks { language: String },
    /// The post has blocks, but fewer than the requested index needs
    MissingBlock {
        language: String,
        index: usize,
        available: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoBlocks { language } => write!(f, "no {} code blocks", language),
            SkipReason::MissingBlock {
                language,
                index,
                available,
            } => write!(
                f,
                "{} code block {} requested but only {} found",
                language, index, available
            ),
        }
    }
}

/// A series post that did not get a main exercise file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPost {
    pub title: String,
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Everything one extraction pass did
#[derive(Debug, Default, Serialize)]
pub struct ExtractReport {
    /// Posts that matched the series
    pub series_posts: usize,
    /// Main exercise files, in series order
    pub exercises: Vec<WrittenFile>,
    /// Split SQL files, in series order
    pub sql_files: Vec<WrittenFile>,
    pub skipped: Vec<SkippedPost>,
    /// Files from an earlier pass that no post maps to anymore
    pub removed: Vec<PathBuf>,
}

impl ExtractReport {
    pub fn count(&self, status: WriteStatus) -> usize {
        self.exercises
            .iter()
            .chain(&self.sql_files)
            .filter(|file| file.status == status)
            .count()
    }
}

/// Check the blog root given on the command line or through `BLOG_PATH`.
pub fn resolve_blog_root(blog_path: Option<&Path>) -> Result<PathBuf> {
    let Some(path) = blog_path else {
        bail!(
            "BLOG_PATH environment variable not set.\n\
             Usage: BLOG_PATH=/path/to/hugo/blog extract_from_blog [BLOCK_INDEX]"
        );
    };

    if !path.exists() {
        bail!("Blog path does not exist: {}", path.display());
    }
    if !path.is_dir() {
        bail!("Blog path is not a directory: {}", path.display());
    }

    Ok(path.to_path_buf())
}

/// Ordinal of the post at a 0-based position in the sorted series.
pub fn ordinal_for(numbering: Numbering, position: usize, post: &Post) -> i64 {
    match numbering {
        Numbering::Position => position as i64 + 1,
        Numbering::Weight => post.weight,
    }
}

/// Title used for naming, falling back to `Exercise N` for untitled posts.
pub fn display_title(post: &Post, ordinal: i64) -> String {
    post.title
        .clone()
        .unwrap_or_else(|| format!("Exercise {}", ordinal))
}

/// Run one extraction pass over the blog at `blog_root`.
///
/// Every series post gets the file for its `block_index`-th block of the configured language,
/// and when enabled one file per query found in its `sql` blocks. Files left over from earlier
/// passes are removed. Running twice over the same input rewrites byte-identical files.
pub fn run_extraction(
    blog_root: &Path,
    block_index: usize,
    config: &ProjectConfig,
) -> Result<ExtractReport> {
    let content_dir = blog_root.join(&config.content_dir);
    let posts = load_posts(&content_dir, &config.taxonomy)?;
    let series = filter_series(posts, &config.series);

    let mut report = ExtractReport {
        series_posts: series.len(),
        ..Default::default()
    };

    if series.is_empty() {
        tracing::warn!(series = %config.series, "no posts found in series");
        return Ok(report);
    }

    let primary = FenceMatcher::new(&config.language)?;
    let sql = FenceMatcher::new("sql")?;
    let primary_ext = extension_for(primary.language());
    let mut writer = ExerciseWriter::new();

    for (position, post) in series.iter().enumerate() {
        let ordinal = ordinal_for(config.numbering, position, post);
        let title = display_title(post, ordinal);
        let stem = writer.claim_stem(ordinal, &slugify(&title));

        match primary.nth(&post.body, block_index) {
            Some(code) => {
                let path = config.output_dir.join(format!("{}.{}", stem, primary_ext));
                report.exercises.push(writer.write(&path, code)?);
            }
            None => {
                let available = primary.blocks(&post.body).len();
                let reason = if available == 0 {
                    SkipReason::NoBlocks {
                        language: primary.language().to_string(),
                    }
                } else {
                    SkipReason::MissingBlock {
                        language: primary.language().to_string(),
                        index: block_index,
                        available,
                    }
                };
                tracing::warn!(
                    title = %title,
                    path = %post.path.display(),
                    "skipping post: {}",
                    reason
                );
                report.skipped.push(SkippedPost {
                    title,
                    path: post.path.clone(),
                    reason,
                });
            }
        }

        if config.extract_sql {
            let blocks = sql.blocks(&post.body);
            for (block_no, block) in blocks.iter().enumerate() {
                let queries = split_sql_by_comments(block);
                for (query_no, text) in queries.iter().enumerate() {
                    let name = sql_exercise_name(
                        &stem,
                        blocks.len(),
                        block_no + 1,
                        queries.len(),
                        query_no + 1,
                    );
                    let path = config.sql_dir.join(name);
                    report.sql_files.push(writer.write(&path, &format!("{}\n", text))?);
                }
            }
        }
    }

    report.removed = writer.prune_stale(&config.output_dir, primary_ext)?;
    if config.extract_sql {
        report
            .removed
            .extend(writer.prune_stale(&config.sql_dir, "sql")?);
    }

    Ok(report)
}

/// `extract_from_blog [BLOCK_INDEX]`
pub fn extract_command(
    blog_path: Option<&Path>,
    block_index: usize,
    config: &ProjectConfig,
) -> Result<()> {
    let start_time = Instant::now();
    let blog_root = resolve_blog_root(blog_path)?;

    println!(
        "{}",
        format!(
            "Extracting '{}' exercises from: {}",
            config.series,
            blog_root.display()
        )
        .green()
    );

    let report = run_extraction(&blog_root, block_index, config)?;

    if report.series_posts == 0 {
        println!(
            "{}",
            format!("No posts found in series '{}'", config.series).yellow()
        );
        return Ok(());
    }

    println!("Found {} posts in series", report.series_posts);

    for file in report.exercises.iter().chain(&report.sql_files) {
        println!("  ✓ {} ({})", file.path.display(), status_label(file.status));
    }
    for skipped in &report.skipped {
        println!("  {} {}: {}", "⚠".yellow(), skipped.title, skipped.reason);
    }
    for path in &report.removed {
        println!("  {} {}", "removed".dimmed(), path.display());
    }

    println!("\nExtraction summary:");
    println!("  Exercise files: {}", report.exercises.len());
    println!("  SQL files: {}", report.sql_files.len());
    println!(
        "  Created: {}, updated: {}, unchanged: {}",
        report.count(WriteStatus::Created),
        report.count(WriteStatus::Updated),
        report.count(WriteStatus::Unchanged)
    );
    println!("  Skipped posts: {}", report.skipped.len());
    println!("  Removed stale files: {}", report.removed.len());
    println!("  Finished in {:.2?}", start_time.elapsed());

    Ok(())
}

fn status_label(status: WriteStatus) -> colored::ColoredString {
    match status {
        WriteStatus::Created => "created".green(),
        WriteStatus::Updated => "updated".yellow(),
        WriteStatus::Unchanged => "unchanged".dimmed(),
    }
}
