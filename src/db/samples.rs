//! Canned sample tables used by the exercises

use duckdb::{params, Connection};

/// (id, name, email, city, signup_date, is_premium)
const CUSTOMERS: &[(i32, &str, &str, &str, &str, bool)] = &[
    (1, "Alice Johnson", "alice@example.com", "New York", "2024-01-15", true),
    (2, "Bob Smith", "bob@example.com", "San Francisco", "2024-02-20", false),
    (3, "Carol White", "carol@example.com", "Boston", "2024-01-10", true),
    (4, "David Brown", "david@example.com", "Seattle", "2024-03-05", false),
    (5, "Eve Davis", "eve@example.com", "Austin", "2024-02-28", true),
];

/// (id, customer_id, product, amount, order_date)
const ORDERS: &[(i32, i32, &str, f64, &str)] = &[
    (1001, 1, "Widget", 150.50, "2024-03-01"),
    (1002, 2, "Gadget", 75.00, "2024-03-02"),
    (1003, 1, "Gizmo", 200.00, "2024-03-05"),
    (1004, 3, "Widget", 50.25, "2024-03-06"),
    (1005, 4, "Doohickey", 300.00, "2024-03-07"),
];

/// (id, name, headquarters_city)
const VENDORS: &[(i32, &str, Option<&str>)] = &[
    (1, "Acme Supplies", Some("Portland")),
    (2, "Global Parts", Some("Seattle")),
    (3, "Quick Ship", None),
];

/// (total, count)
const STATS: &[(f64, i32)] = &[(100.0, 5), (200.0, 0), (50.0, 10)];

/// A named sample table that can be loaded into a fresh connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleTable {
    Customers,
    Orders,
    Vendors,
    Stats,
}

impl SampleTable {
    pub const ALL: [SampleTable; 4] = [
        SampleTable::Customers,
        SampleTable::Orders,
        SampleTable::Vendors,
        SampleTable::Stats,
    ];

    /// Table name as created in the database
    pub fn name(self) -> &'static str {
        match self {
            SampleTable::Customers => "customers",
            SampleTable::Orders => "orders",
            SampleTable::Vendors => "vendors",
            SampleTable::Stats => "stats",
        }
    }

    /// Create the table and insert its rows, returning how many rows went in.
    pub fn load(self, conn: &Connection) -> duckdb::Result<usize> {
        match self {
            SampleTable::Customers => load_sample_customers(conn),
            SampleTable::Orders => load_sample_orders(conn),
            SampleTable::Vendors => load_sample_vendors(conn),
            SampleTable::Stats => load_sample_stats(conn),
        }
    }
}

/// Load several sample tables, returning the total row count.
pub fn load_samples(conn: &Connection, tables: &[SampleTable]) -> duckdb::Result<usize> {
    let mut total = 0;
    for table in tables {
        total += table.load(conn)?;
    }
    Ok(total)
}

/// Create and fill the `customers` table.
pub fn load_sample_customers(conn: &Connection) -> duckdb::Result<usize> {
    conn.execute_batch(
        "CREATE TABLE customers (
            id INTEGER,
            name VARCHAR,
            email VARCHAR,
            city VARCHAR,
            signup_date DATE,
            is_premium BOOLEAN
        )",
    )?;

    let mut stmt = conn.prepare("INSERT INTO customers VALUES (?, ?, ?, ?, CAST(? AS DATE), ?)")?;
    for &(id, name, email, city, signup_date, is_premium) in CUSTOMERS {
        stmt.execute(params![id, name, email, city, signup_date, is_premium])?;
    }

    Ok(CUSTOMERS.len())
}

/// Create and fill the `orders` table.
pub fn load_sample_orders(conn: &Connection) -> duckdb::Result<usize> {
    conn.execute_batch(
        "CREATE TABLE orders (
            id INTEGER,
            customer_id INTEGER,
            product VARCHAR,
            amount DECIMAL(10, 2),
            order_date DATE
        )",
    )?;

    let mut stmt = conn.prepare("INSERT INTO orders VALUES (?, ?, ?, ?, CAST(? AS DATE))")?;
    for &(id, customer_id, product, amount, order_date) in ORDERS {
        stmt.execute(params![id, customer_id, product, amount, order_date])?;
    }

    Ok(ORDERS.len())
}

/// Add nullable columns to `customers` for the NULL handling exercises.
///
/// Must run after [`load_sample_customers`].
pub fn load_null_columns(conn: &Connection) -> duckdb::Result<()> {
    conn.execute_batch(
        "ALTER TABLE customers ADD COLUMN middle_name VARCHAR;
        ALTER TABLE customers ADD COLUMN nickname VARCHAR;
        ALTER TABLE customers ADD COLUMN phone VARCHAR;
        ALTER TABLE customers ADD COLUMN state VARCHAR;
        ALTER TABLE customers ADD COLUMN status VARCHAR;
        UPDATE customers SET
            middle_name = CASE WHEN id IN (1, 3) THEN 'Marie' ELSE NULL END,
            nickname = CASE WHEN id IN (2, 5) THEN 'Bobby' ELSE NULL END,
            phone = CASE WHEN id IN (1, 2, 4) THEN '555-0100' ELSE NULL END,
            state = CASE WHEN id IN (1, 3, 5) THEN 'NY' ELSE NULL END,
            status = CASE WHEN id IN (1, 2, 3) THEN 'active' ELSE NULL END;",
    )
}

/// Create and fill the `vendors` table.
pub fn load_sample_vendors(conn: &Connection) -> duckdb::Result<usize> {
    conn.execute_batch(
        "CREATE TABLE vendors (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            headquarters_city TEXT
        )",
    )?;

    let mut stmt = conn.prepare("INSERT INTO vendors VALUES (?, ?, ?)")?;
    for &(id, name, headquarters_city) in VENDORS {
        stmt.execute(params![id, name, headquarters_city])?;
    }

    Ok(VENDORS.len())
}

/// Create and fill the `stats` table used by the NULLIF exercises.
pub fn load_sample_stats(conn: &Connection) -> duckdb::Result<usize> {
    conn.execute_batch(
        "CREATE TABLE stats (
            total DECIMAL(10, 2),
            count INTEGER
        )",
    )?;

    let mut stmt = conn.prepare("INSERT INTO stats VALUES (?, ?)")?;
    for &(total, count) in STATS {
        stmt.execute(params![total, count])?;
    }

    Ok(STATS.len())
}
