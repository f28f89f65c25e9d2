use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::blog::blocks::FenceMatcher;
use crate::blog::{filter_series, load_posts};
use crate::commands::config::ProjectConfig;
use crate::commands::extract::{display_title, ordinal_for, resolve_blog_root};
use crate::exercises::{slugify, ExerciseWriter};

/// One series post as `list` reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesEntry {
    pub ordinal: i64,
    pub weight: i64,
    pub title: String,
    pub path: PathBuf,
    /// The `{ordinal}_{slug}` name its exercise files get
    pub stem: String,
    /// Blocks of the configured language
    pub code_blocks: usize,
    pub sql_blocks: usize,
}

/// Series posts in exercise order, named exactly as `extract` would name them.
pub fn list_series(blog_root: &Path, config: &ProjectConfig) -> Result<Vec<SeriesEntry>> {
    let posts = load_posts(&blog_root.join(&config.content_dir), &config.taxonomy)?;
    let series = filter_series(posts, &config.series);

    let primary = FenceMatcher::new(&config.language)?;
    let sql = FenceMatcher::new("sql")?;
    let mut writer = ExerciseWriter::new();

    Ok(series
        .iter()
        .enumerate()
        .map(|(position, post)| {
            let ordinal = ordinal_for(config.numbering, position, post);
            let title = display_title(post, ordinal);
            let stem = writer.claim_stem(ordinal, &slugify(&title));

            SeriesEntry {
                ordinal,
                weight: post.weight,
                title,
                path: post.path.clone(),
                stem,
                code_blocks: primary.blocks(&post.body).len(),
                sql_blocks: sql.blocks(&post.body).len(),
            }
        })
        .collect())
}

/// `extract_from_blog list`
pub fn list_command(blog_path: Option<&Path>, config: &ProjectConfig, format: &str) -> Result<()> {
    let blog_root = resolve_blog_root(blog_path)?;
    let entries = list_series(&blog_root, config)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
        "text" => {
            if entries.is_empty() {
                println!(
                    "{}",
                    format!("No posts found in series '{}'", config.series).yellow()
                );
                return Ok(());
            }

            println!("{}", format!("Series: {}", config.series).green());
            for entry in &entries {
                println!(
                    "  {:>3}  {}  (weight {}, {} {} / {} sql blocks)",
                    entry.ordinal,
                    entry.stem.bold(),
                    entry.weight,
                    entry.code_blocks,
                    config.language,
                    entry.sql_blocks
                );
            }
            println!("\nTotal posts: {}", entries.len());
        }
        other => bail!("Unknown output format: {} (expected text or json)", other),
    }

    Ok(())
}
