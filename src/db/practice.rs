//! Reproducible practice data: a larger, randomized `customers` table

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use duckdb::{params, Connection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::Path;

use super::{query, QueryResult};

/// Number of customers generated per batch
pub const PRACTICE_CUSTOMER_COUNT: usize = 50;

/// Seed for [`practice_rng`], fixed so every run sees the same people
pub const PRACTICE_SEED: u64 = 42;

/// Days before `today` a signup date may fall on
const SIGNUP_WINDOW_DAYS: i64 = 730;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "David", "Eve", "Frank", "Grace", "Henry", "Irene", "Jack", "Karen",
    "Liam", "Maria", "Nathan", "Olivia", "Peter", "Quinn", "Rosa", "Samuel", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Johnson", "Smith", "White", "Brown", "Davis", "Garcia", "Miller", "Wilson", "Moore",
    "Taylor", "Anderson", "Thomas", "Jackson", "Martin", "Lee", "O'Connor", "Clark", "Lewis",
];

const CITIES: &[&str] = &[
    "New York", "San Francisco", "Boston", "Seattle", "Austin", "Chicago", "Denver", "Portland",
    "Miami", "Atlanta", "Phoenix", "Nashville",
];

/// Premium is a one in four draw
const PREMIUM_CHOICES: [bool; 4] = [true, false, false, false];

/// One generated customer row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeCustomer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub city: String,
    pub signup_date: NaiveDate,
    pub is_premium: bool,
}

/// RNG seeded with [`PRACTICE_SEED`].
pub fn practice_rng() -> StdRng {
    StdRng::seed_from_u64(PRACTICE_SEED)
}

/// Generate [`PRACTICE_CUSTOMER_COUNT`] customers who signed up within two years of `today`.
pub fn generate_customer_data<R: Rng>(rng: &mut R, today: NaiveDate) -> Vec<PracticeCustomer> {
    (1..=PRACTICE_CUSTOMER_COUNT as i32)
        .map(|id| {
            let first = pick(rng, FIRST_NAMES);
            let last = pick(rng, LAST_NAMES);
            let days_ago = rng.gen_range(0..=SIGNUP_WINDOW_DAYS);

            PracticeCustomer {
                id,
                name: format!("{} {}", first, last),
                email: email_for(first, last, id),
                city: pick(rng, CITIES).to_string(),
                signup_date: today - Duration::days(days_ago),
                is_premium: PREMIUM_CHOICES[rng.gen_range(0..PREMIUM_CHOICES.len())],
            }
        })
        .collect()
}

fn pick<'a, R: Rng>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn email_for(first: &str, last: &str, id: i32) -> String {
    let local: String = format!("{}.{}", first, last)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect();
    format!("{}{}@example.com", local.to_lowercase(), id)
}

/// Create `customers` from generated rows and read the whole table back.
pub fn load_customer_data(
    conn: &Connection,
    customers: &[PracticeCustomer],
) -> duckdb::Result<QueryResult> {
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

    let mut stmt =
        conn.prepare("INSERT INTO customers VALUES (?, ?, ?, ?, CAST(? AS DATE), ?)")?;
    for customer in customers {
        stmt.execute(params![
            customer.id,
            customer.name,
            customer.email,
            customer.city,
            customer.signup_date.format("%Y-%m-%d").to_string(),
            customer.is_premium,
        ])?;
    }

    query(conn, "SELECT * FROM customers ORDER BY id")
}

/// Write generated rows to a CSV file with a header line.
pub fn write_customers_csv(path: &Path, customers: &[PracticeCustomer]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    for customer in customers {
        writer.serialize(customer)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write CSV file {}", path.display()))?;

    Ok(())
}
