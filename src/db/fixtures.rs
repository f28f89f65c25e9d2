//! Named connection setups shared by tests and `verify`.
//!
//! Each call opens a brand new in-memory database, so nothing leaks between callers. The
//! connection closes when it is dropped.

use super::samples::{load_null_columns, load_samples, SampleTable};
use super::{create_connection, Database};
use duckdb::Connection;

/// A clean in-memory connection.
pub fn db_connection() -> duckdb::Result<Connection> {
    create_connection(Database::InMemory)
}

/// Connection with the `customers` table.
pub fn db_with_customers() -> duckdb::Result<Connection> {
    with_tables(&[SampleTable::Customers])
}

/// Connection with the `orders` table.
pub fn db_with_orders() -> duckdb::Result<Connection> {
    with_tables(&[SampleTable::Orders])
}

/// Connection with both `customers` and `orders`.
pub fn db_with_sample_data() -> duckdb::Result<Connection> {
    with_tables(&[SampleTable::Customers, SampleTable::Orders])
}

/// Connection with every sample table, including the nullable `customers` columns.
pub fn db_with_everything() -> duckdb::Result<Connection> {
    let conn = with_tables(&SampleTable::ALL)?;
    load_null_columns(&conn)?;
    Ok(conn)
}

fn with_tables(tables: &[SampleTable]) -> duckdb::Result<Connection> {
    let conn = db_connection()?;
    load_samples(&conn, tables)?;
    Ok(conn)
}
