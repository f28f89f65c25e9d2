//! DuckDB helpers for running exercises
//!
//! Everything here is single-shot: open a connection, load canned data, run a statement,
//! collect the rows. Engine failures come back as [`duckdb::Error`] untouched.

pub mod fixtures;
pub mod practice;
pub mod samples;

use anyhow::{Context, Result};
use duckdb::types::Value;
use duckdb::Connection;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use samples::{
    load_null_columns, load_sample_customers, load_sample_orders, load_sample_stats,
    load_sample_vendors, load_samples, SampleTable,
};

/// One result row, in column order
pub type Row = Vec<Value>;

/// One result row keyed by column name or alias
pub type Record = BTreeMap<String, Value>;

/// Where a connection keeps its data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Database {
    #[default]
    InMemory,
    File(PathBuf),
}

impl From<&str> for Database {
    /// `":memory:"` (or an empty string) means in-memory, anything else is a file path.
    fn from(value: &str) -> Self {
        match value {
            "" | ":memory:" => Database::InMemory,
            path => Database::File(PathBuf::from(path)),
        }
    }
}

impl From<&Path> for Database {
    fn from(path: &Path) -> Self {
        Database::File(path.to_path_buf())
    }
}

impl From<PathBuf> for Database {
    fn from(path: PathBuf) -> Self {
        Database::File(path)
    }
}

/// Open a DuckDB connection.
pub fn create_connection(database: impl Into<Database>) -> duckdb::Result<Connection> {
    match database.into() {
        Database::InMemory => Connection::open_in_memory(),
        Database::File(path) => Connection::open(path),
    }
}

/// Column names plus rows of a finished query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn into_records(self) -> Vec<Record> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect()
    }
}

/// Run one statement and collect every row along with the column names.
pub fn query(conn: &Connection, sql: &str) -> duckdb::Result<QueryResult> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let columns = rows
        .as_ref()
        .map(|statement| statement.column_names())
        .unwrap_or_default();

    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            values.push(row.get::<_, Value>(idx)?);
        }
        collected.push(values);
    }

    Ok(QueryResult {
        columns,
        rows: collected,
    })
}

/// Run a query and return the rows as tuples.
pub fn query_to_list(conn: &Connection, sql: &str) -> duckdb::Result<Vec<Row>> {
    Ok(query(conn, sql)?.rows)
}

/// Run a query and return each row as a column-name keyed map.
pub fn query_to_dict_list(conn: &Connection, sql: &str) -> duckdb::Result<Vec<Record>> {
    Ok(query(conn, sql)?.into_records())
}

/// Read a SQL file, trimmed of surrounding whitespace.
pub fn load_sql_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read SQL file: {}", path.display()))?;
    Ok(content.trim().to_string())
}

/// Run every statement in a SQL file and return the rows of the last one.
///
/// A file without any executable statement returns no rows.
pub fn execute_sql_file(conn: &Connection, path: impl AsRef<Path>) -> Result<QueryResult> {
    let content = load_sql_file(path)?;
    let statements = split_sql_statements(&content);

    let Some((last, leading)) = statements.split_last() else {
        return Ok(QueryResult::default());
    };

    for statement in leading {
        conn.execute_batch(statement)?;
    }

    Ok(query(conn, last)?)
}

/// Split SQL text into statements at semicolons.
///
/// Semicolons inside quoted strings or identifiers and inside `--` comments do not split.
/// Fragments that hold nothing but comments and whitespace are dropped.
pub fn split_sql_statements(sql: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut chars = sql.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' => quote = Some(ch),
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                while let Some(&(_, next)) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ';' => {
                pieces.push(&sql[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    pieces.push(&sql[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| has_code(piece))
        .collect()
}

fn has_code(statement: &str) -> bool {
    statement.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with("--")
    })
}
