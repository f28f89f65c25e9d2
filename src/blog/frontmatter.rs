//! Front matter extraction for Hugo posts.
//!
//! Hugo accepts YAML front matter between `---` lines and TOML front matter between `+++`
//! lines:
//!
//! ```markdown
//! ---
//! title: Zero Setup SQL
//! weight: 2
//! series: ["SQL for Python Developers"]
//! ---
//!
//! Body starts here.
//! ```
//!
//! Both formats end up as a [`serde_yaml::Value`] so the rest of the loader only deals with
//! one representation.

use serde_yaml::Value;

/// Front matter format, picked from the opening delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn delimiter(self) -> &'static str {
        match self {
            Format::Yaml => "---",
            Format::Toml => "+++",
        }
    }
}

/// Result of front matter extraction.
#[derive(Debug, Clone)]
pub struct FrontMatter<'a> {
    value: Option<Value>,
    body: &'a str,
    format: Option<Format>,
}

impl<'a> FrontMatter<'a> {
    fn without_front_matter(body: &'a str) -> Self {
        Self {
            value: None,
            body,
            format: None,
        }
    }

    /// Check if front matter was found and parsed.
    pub fn has_front_matter(&self) -> bool {
        self.value.is_some()
    }

    /// Delimiter style that was found, even if the block failed to parse.
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// Get the parsed metadata, if present.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Get a single field from the metadata.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.as_ref()?.get(key)
    }

    /// Get a string field from the metadata.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Body content after the closing delimiter.
    pub fn body(&self) -> &'a str {
        self.body
    }
}

/// Split YAML or TOML front matter off a markdown document.
///
/// - No opening delimiter: the whole content is the body.
/// - Opening delimiter without a closing one: the whole content is the body.
/// - Delimiters present but the block does not parse: a warning is logged, the metadata is empty
///   and the body starts after the closing delimiter.
pub fn extract_frontmatter(content: &str) -> FrontMatter<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    for format in [Format::Yaml, Format::Toml] {
        let Some((raw, body)) = split_delimited(content, format.delimiter()) else {
            continue;
        };

        let value = match parse_block(raw, format) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(?format, error = %err, "failed to parse front matter");
                None
            }
        };

        return FrontMatter {
            value,
            body,
            format: Some(format),
        };
    }

    FrontMatter::without_front_matter(content)
}

fn parse_block(raw: &str, format: Format) -> anyhow::Result<Value> {
    let value = match format {
        Format::Yaml => {
            if raw.trim().is_empty() {
                Value::Mapping(Default::default())
            } else {
                serde_yaml::from_str(raw)?
            }
        }
        Format::Toml => {
            let table: toml::Table = toml::from_str(raw)?;
            serde_yaml::to_value(table)?
        }
    };
    Ok(value)
}

/// Returns the text between the opening and closing delimiter lines, and the text after the
/// closing line.
fn split_delimited<'a>(content: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let first_end = content.find('\n')?;
    if content[..first_end].trim_end() != delimiter {
        return None;
    }

    let inner_start = first_end + 1;
    let mut offset = inner_start;
    loop {
        let line_end = content[offset..].find('\n').map(|i| offset + i);
        let line = &content[offset..line_end.unwrap_or(content.len())];
        if line.trim_end() == delimiter {
            let body_start = line_end.map_or(content.len(), |i| i + 1);
            return Some((&content[inner_start..offset], &content[body_start..]));
        }
        match line_end {
            Some(i) => offset = i + 1,
            None => return None,
        }
    }
}
