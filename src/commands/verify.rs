use anyhow::{bail, Result};
use colored::Colorize;
use rustpython_parser::{ast, Parse};
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser as SqlParser;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::commands::config::ProjectConfig;
use crate::db::execute_sql_file;
use crate::db::fixtures::db_with_everything;
use crate::display::{fail_line, pass_line};
use crate::exercises::extension_for;

/// Result of checking one exercise file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed { detail: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    pub path: PathBuf,
    pub outcome: CheckOutcome,
}

impl FileCheck {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Passed { .. })
    }
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub checks: Vec<FileCheck>,
}

impl VerifyReport {
    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|check| !check.passed()).count()
    }
}

/// Sorted `*.{extension}` files directly inside `dir`. A missing directory has none.
pub fn find_exercise_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect()
}

/// Run a SQL exercise against a fresh database holding every sample table.
///
/// The DuckDB run decides the outcome. `sqlparser` only contributes the statement count, and a
/// file it cannot parse still passes when DuckDB runs it.
pub fn check_sql_file(path: &Path) -> CheckOutcome {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            return CheckOutcome::Failed {
                reason: format!("unreadable: {}", err),
            }
        }
    };

    if source.trim().is_empty() {
        return CheckOutcome::Failed {
            reason: "empty file".to_string(),
        };
    }

    let parsed = SqlParser::parse_sql(&DuckDbDialect {}, &source);

    let conn = match db_with_everything() {
        Ok(conn) => conn,
        Err(err) => {
            return CheckOutcome::Failed {
                reason: format!("could not prepare sample database: {}", err),
            }
        }
    };

    match execute_sql_file(&conn, path) {
        Ok(result) => {
            let statements = match parsed {
                Ok(statements) => format!("{} statement(s)", statements.len()),
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "sqlparser rejected file");
                    "DuckDB-only syntax".to_string()
                }
            };
            CheckOutcome::Passed {
                detail: format!("{}, {} row(s)", statements, result.rows.len()),
            }
        }
        Err(err) => CheckOutcome::Failed {
            reason: format!("{:#}", err),
        },
    }
}

/// A code exercise must be readable and non-empty. Python sources must also parse.
pub fn check_code_file(path: &Path) -> CheckOutcome {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            return CheckOutcome::Failed {
                reason: format!("unreadable: {}", err),
            }
        }
    };

    if source.trim().is_empty() {
        return CheckOutcome::Failed {
            reason: "empty file".to_string(),
        };
    }

    if path.extension().is_some_and(|ext| ext == "py") {
        if let Err(reason) = check_python_syntax(&source, path) {
            return CheckOutcome::Failed { reason };
        }
    }

    CheckOutcome::Passed {
        detail: format!("{} line(s)", source.lines().count()),
    }
}

/// Parse Python source, describing a syntax error with its line and column.
pub fn check_python_syntax(source: &str, path: &Path) -> std::result::Result<(), String> {
    let source_path = path.display().to_string();
    match ast::Suite::parse(source, &source_path) {
        Ok(_) => Ok(()),
        Err(err) => {
            let (line, column) = line_and_column(source, u32::from(err.offset) as usize);
            Err(format!(
                "SyntaxError: {} at line {}, column {}",
                err.error, line, column
            ))
        }
    }
}

/// 1-based line and column of a byte offset.
fn line_and_column(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

/// Check every extracted file under the configured output directories.
pub fn verify_exercises(config: &ProjectConfig) -> Result<VerifyReport> {
    let code_files = find_exercise_files(&config.output_dir, extension_for(&config.language));
    let sql_files = find_exercise_files(&config.sql_dir, "sql");

    let mut report = VerifyReport::default();
    for path in code_files {
        let outcome = check_code_file(&path);
        report.checks.push(FileCheck { path, outcome });
    }
    for path in sql_files {
        let outcome = check_sql_file(&path);
        report.checks.push(FileCheck { path, outcome });
    }

    Ok(report)
}

/// `extract_from_blog verify`
pub fn verify_command(config: &ProjectConfig) -> Result<()> {
    println!("{}", "Verifying extracted exercises".green());

    let report = verify_exercises(config)?;
    if report.checks.is_empty() {
        tracing::warn!(
            output_dir = %config.output_dir.display(),
            sql_dir = %config.sql_dir.display(),
            "no exercise files found"
        );
        println!(
            "{}",
            "No exercise files found. Run extract_from_blog first.".yellow()
        );
        return Ok(());
    }

    for check in &report.checks {
        match &check.outcome {
            CheckOutcome::Passed { detail } => {
                println!(
                    "{}",
                    pass_line(&format!("{} ({})", check.path.display(), detail))
                );
            }
            CheckOutcome::Failed { reason } => {
                eprintln!("{}", fail_line(&check.path.display().to_string()));
                eprintln!("   - {}", reason);
            }
        }
    }

    let failures = report.failures();
    println!("\nVerification summary:");
    println!("  Passed: {}", report.checks.len() - failures);
    println!("  Failed: {}", failures);
    println!("  Total files checked: {}", report.checks.len());

    if failures > 0 {
        bail!("{} exercise file(s) failed verification", failures);
    }
    Ok(())
}
