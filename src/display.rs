use chrono::{Duration, NaiveDate};
use colored::*;
use duckdb::types::Value;

use crate::db::QueryResult;

/// Render a DuckDB value the way a reader expects to see it in a table.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::TinyInt(n) => n.to_string(),
        Value::SmallInt(n) => n.to_string(),
        Value::Int(n) => n.to_string(),
        Value::BigInt(n) => n.to_string(),
        Value::HugeInt(n) => n.to_string(),
        Value::UTinyInt(n) => n.to_string(),
        Value::USmallInt(n) => n.to_string(),
        Value::UInt(n) => n.to_string(),
        Value::UBigInt(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Double(n) => n.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Text(s) | Value::Enum(s) => s.clone(),
        Value::Date32(days) => epoch_date(*days),
        other => format!("{:?}", other),
    }
}

fn epoch_date(days: i32) -> String {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(i64::from(days))))
        .map(|date| date.to_string())
        .unwrap_or_else(|| days.to_string())
}

/// Format up to `limit` rows as an aligned text table with a bold header.
pub fn render_table(result: &QueryResult, limit: usize) -> String {
    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .take(limit)
        .map(|row| row.iter().map(format_value).collect())
        .collect();

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let header = result
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut out = format!("{}\n{}\n", header.bold(), rule);
    for row in &cells {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Line printed for a file that passed a check
pub fn pass_line(label: &str) -> String {
    format!("{} {}", "✅".green(), label)
}

/// Line printed for a file that failed a check
pub fn fail_line(label: &str) -> String {
    format!("{} {}", "❌".red(), label)
}
