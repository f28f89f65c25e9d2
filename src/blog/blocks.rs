//! Fenced code block extraction

use anyhow::Result;
use regex::Regex;

/// Finds fenced code blocks tagged with one language.
///
/// An opening fence is a line made of three backticks and the language tag, optionally
/// indented. The block runs until the next three backticks. Fences carrying extra info after the
/// tag (`python3`, `sql {hl_lines=2}`) belong to a different language and are not matched.
#[derive(Debug, Clone)]
pub struct FenceMatcher {
    language: String,
    pattern: Regex,
}

impl FenceMatcher {
    pub fn new(language: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(?ms)^[ \t]*```{}\r?\n(.*?)```",
            regex::escape(language)
        ))?;

        Ok(Self {
            language: language.to_string(),
            pattern,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// All matching blocks in document order, each exactly as written between the fences.
    pub fn blocks<'a>(&self, body: &'a str) -> Vec<&'a str> {
        self.pattern
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// The block at a 0-based index, if the body has that many.
    pub fn nth<'a>(&self, body: &'a str, index: usize) -> Option<&'a str> {
        self.pattern
            .captures_iter(body)
            .nth(index)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Extract every code block of `language` from a markdown body.
pub fn extract_code_blocks<'a>(body: &'a str, language: &str) -> Result<Vec<&'a str>> {
    Ok(FenceMatcher::new(language)?.blocks(body))
}

/// Split a SQL snippet into separate queries at comment lines.
///
/// A comment line that follows query text starts the next query. Comments and blank lines are
/// not part of any query. A CTE (`WITH ...`) is a single statement whose comments annotate it,
/// so it comes back whole.
pub fn split_sql_by_comments(sql: &str) -> Vec<String> {
    let stripped = sql.trim();

    if stripped
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("with"))
    {
        return vec![stripped.to_string()];
    }

    let mut queries = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in stripped.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("--") {
            flush_query(&mut current, &mut queries);
        } else if !trimmed.is_empty() {
            current.push(line);
        }
    }
    flush_query(&mut current, &mut queries);

    queries
}

fn flush_query(current: &mut Vec<&str>, queries: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }

    let query = current.join("\n").trim().to_string();
    if !query.is_empty() {
        queries.push(query);
    }
    current.clear();
}
