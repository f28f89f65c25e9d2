use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use std::path::Path;

use crate::db::fixtures::db_connection;
use crate::db::practice::{
    generate_customer_data, load_customer_data, practice_rng, write_customers_csv,
};
use crate::display::render_table;

/// Rows shown in the preview table
const PREVIEW_ROWS: usize = 5;

/// `extract_from_blog generate`: load the practice `customers` table and preview it.
pub fn generate_command(csv_path: Option<&Path>) -> Result<()> {
    let customers = generate_customer_data(&mut practice_rng(), Local::now().date_naive());

    let conn = db_connection()?;
    let result = load_customer_data(&conn, &customers)?;

    println!("Returned {} rows of data.", result.rows.len());
    println!("Here are the first {} rows:\n", PREVIEW_ROWS);
    print!("{}", render_table(&result, PREVIEW_ROWS));

    if let Some(path) = csv_path {
        write_customers_csv(path, &customers)?;
        println!(
            "\n{}",
            format!("Wrote {} rows to {}", customers.len(), path.display()).green()
        );
    }

    Ok(())
}
