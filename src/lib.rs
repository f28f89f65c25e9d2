//! Exercise extraction for the "SQL for Python Developers" blog series.
//!
//! Blog posts are Hugo markdown documents. Posts tagged with the series are sorted by weight,
//! their fenced `python` and `sql` blocks are pulled out, and each one is written as a numbered
//! exercise file. The [`db`] module holds the DuckDB helpers and fixtures the exercises are
//! checked against.

pub mod blog;
pub mod commands;
pub mod db;
pub mod display;
pub mod exercises;

/// Series every exercise belongs to unless the project config says otherwise.
pub const DEFAULT_SERIES: &str = "SQL for Python Developers";
