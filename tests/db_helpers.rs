mod common;

use duckdb::types::Value;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::io;

use common::{temp_db_file, write_file};
use sql_exercises::db::fixtures::{
    db_connection, db_with_customers, db_with_everything, db_with_orders, db_with_sample_data,
};
use sql_exercises::db::{
    create_connection, execute_sql_file, load_sample_customers, load_sample_orders,
    load_sql_file, query_to_dict_list, query_to_list, Database,
};

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn column_names(conn: &duckdb::Connection, table: &str) -> Vec<Value> {
    query_to_list(
        conn,
        &format!(
            "SELECT column_name FROM information_schema.columns \
             WHERE table_name = '{}' ORDER BY ordinal_position",
            table
        ),
    )
    .unwrap()
    .into_iter()
    .flatten()
    .collect()
}

// create_connection

#[test]
fn test_creates_memory_connection() {
    let conn = create_connection(":memory:").unwrap();
    assert_eq!(
        query_to_list(&conn, "SELECT 1 AS num").unwrap(),
        vec![vec![Value::Int(1)]]
    );
}

#[test]
fn test_default_is_memory() {
    let conn = create_connection(Database::default()).unwrap();
    assert_eq!(
        query_to_list(&conn, "SELECT 1").unwrap(),
        vec![vec![Value::Int(1)]]
    );
}

#[test]
fn test_creates_file_connection() {
    let db = temp_db_file();
    {
        let conn = create_connection(db.path.as_path()).unwrap();
        conn.execute_batch("CREATE TABLE test (id INT)").unwrap();
    }

    assert!(db.path.exists());
    let conn = create_connection(db.path.clone()).unwrap();
    let tables = query_to_list(&conn, "SHOW TABLES").unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0][0], text("test"));
}

// sample tables

#[test]
fn test_load_sample_customers() {
    let conn = db_connection().unwrap();
    assert_eq!(load_sample_customers(&conn).unwrap(), 5);

    assert_eq!(
        column_names(&conn, "customers"),
        ["id", "name", "email", "city", "signup_date", "is_premium"]
            .map(text)
            .to_vec()
    );

    let customers =
        query_to_list(&conn, "SELECT id, name, email, city FROM customers ORDER BY id").unwrap();
    assert_eq!(
        customers[0],
        vec![Value::Int(1), text("Alice Johnson"), text("alice@example.com"), text("New York")]
    );
    assert_eq!(
        customers[1],
        vec![Value::Int(2), text("Bob Smith"), text("bob@example.com"), text("San Francisco")]
    );
    assert_eq!(
        customers[4],
        vec![Value::Int(5), text("Eve Davis"), text("eve@example.com"), text("Austin")]
    );
}

#[test]
fn test_premium_customers() {
    let conn = db_with_customers().unwrap();
    let premium: Vec<Value> =
        query_to_list(&conn, "SELECT name FROM customers WHERE is_premium ORDER BY name")
            .unwrap()
            .into_iter()
            .flatten()
            .collect();

    assert_eq!(
        premium,
        vec![text("Alice Johnson"), text("Carol White"), text("Eve Davis")]
    );
}

#[test]
fn test_load_sample_orders() {
    let conn = db_connection().unwrap();
    assert_eq!(load_sample_orders(&conn).unwrap(), 5);

    assert_eq!(
        column_names(&conn, "orders"),
        ["id", "customer_id", "product", "amount", "order_date"]
            .map(text)
            .to_vec()
    );

    let orders =
        query_to_list(&conn, "SELECT id, customer_id, product FROM orders ORDER BY id").unwrap();
    assert_eq!(orders[0], vec![Value::Int(1001), Value::Int(1), text("Widget")]);
    assert_eq!(orders[2], vec![Value::Int(1003), Value::Int(1), text("Gizmo")]);
    assert_eq!(orders[4], vec![Value::Int(1005), Value::Int(4), text("Doohickey")]);
}

#[test]
fn test_order_amounts() {
    let conn = db_with_orders().unwrap();
    let amounts = query_to_list(&conn, "SELECT CAST(amount AS DOUBLE) FROM orders ORDER BY id")
        .unwrap();

    assert_eq!(amounts[0], vec![Value::Double(150.50)]);
    assert_eq!(amounts[1], vec![Value::Double(75.00)]);
    assert_eq!(amounts[3], vec![Value::Double(50.25)]);
}

#[test]
fn test_count_customers() {
    let conn = db_with_customers().unwrap();
    assert_eq!(
        query_to_list(&conn, "SELECT COUNT(*) FROM customers").unwrap(),
        vec![vec![Value::BigInt(5)]]
    );
}

#[test]
fn test_sample_data_joins() {
    let conn = db_with_sample_data().unwrap();
    let rows = query_to_list(
        &conn,
        "SELECT c.name, COUNT(*) FROM customers c JOIN orders o ON o.customer_id = c.id \
         GROUP BY c.name ORDER BY c.name",
    )
    .unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], vec![text("Alice Johnson"), Value::BigInt(2)]);
}

#[test]
fn test_everything_has_null_columns() {
    let conn = db_with_everything().unwrap();

    let missing_middle =
        query_to_list(&conn, "SELECT id FROM customers WHERE middle_name IS NULL ORDER BY id")
            .unwrap();
    assert_eq!(
        missing_middle,
        vec![vec![Value::Int(2)], vec![Value::Int(4)], vec![Value::Int(5)]]
    );

    let unknown_hq =
        query_to_list(&conn, "SELECT name FROM vendors WHERE headquarters_city IS NULL").unwrap();
    assert_eq!(unknown_hq, vec![vec![text("Quick Ship")]]);

    let safe_ratio = query_to_list(
        &conn,
        "SELECT CAST(total / NULLIF(count, 0) AS DOUBLE) FROM stats ORDER BY total",
    )
    .unwrap();
    assert_eq!(
        safe_ratio,
        vec![vec![Value::Double(5.0)], vec![Value::Double(20.0)], vec![Value::Null]]
    );
}

// query helpers

#[test]
fn test_query_to_list() {
    let conn = db_with_customers().unwrap();

    let rows = query_to_list(&conn, "SELECT id, name FROM customers ORDER BY id LIMIT 2").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec![Value::Int(1), text("Alice Johnson")]);

    assert!(query_to_list(&conn, "SELECT * FROM customers WHERE id = 999")
        .unwrap()
        .is_empty());
    assert_eq!(
        query_to_list(&conn, "SELECT name FROM customers WHERE id = 1").unwrap(),
        vec![vec![text("Alice Johnson")]]
    );
}

#[test]
fn test_query_to_dict_list() {
    let conn = db_with_customers().unwrap();

    let rows = query_to_dict_list(&conn, "SELECT id, name FROM customers WHERE id = 1").unwrap();
    assert_eq!(
        rows,
        vec![BTreeMap::from([
            ("id".to_string(), Value::Int(1)),
            ("name".to_string(), text("Alice Johnson")),
        ])]
    );

    let aliased = query_to_dict_list(
        &conn,
        "SELECT name AS customer_name, city AS location FROM customers WHERE id = 1",
    )
    .unwrap();
    assert_eq!(aliased[0]["customer_name"], text("Alice Johnson"));
    assert_eq!(aliased[0]["location"], text("New York"));

    assert!(query_to_dict_list(&conn, "SELECT * FROM customers WHERE id = 999")
        .unwrap()
        .is_empty());
}

// SQL files

#[test]
fn test_load_sql_file() {
    let dir = tempfile::tempdir().unwrap();

    let plain = write_file(dir.path(), "plain.sql", "SELECT * FROM users");
    assert_eq!(load_sql_file(&plain).unwrap(), "SELECT * FROM users");

    let padded = write_file(dir.path(), "padded.sql", "  \n  SELECT 1  \n  ");
    assert_eq!(load_sql_file(&padded).unwrap(), "SELECT 1");

    let as_string = padded.to_string_lossy().into_owned();
    assert_eq!(load_sql_file(as_string.as_str()).unwrap(), "SELECT 1");
}

#[test]
fn test_load_missing_sql_file_is_not_found() {
    let err = load_sql_file("/nonexistent/path/query.sql").unwrap_err();
    let io_err = err.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_execute_sql_file() {
    let conn = db_with_customers().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "query.sql", "SELECT name FROM customers WHERE id = 1");

    let result = execute_sql_file(&conn, &path).unwrap();
    assert_eq!(result.columns, vec!["name"]);
    assert_eq!(result.rows, vec![vec![text("Alice Johnson")]]);
}

#[test]
fn test_execute_multi_statement_file() {
    let conn = db_connection().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "setup.sql",
        "-- build a table\nCREATE TABLE t (s VARCHAR);\nINSERT INTO t VALUES ('a;b');\nSELECT s FROM t;\n",
    );

    let result = execute_sql_file(&conn, &path).unwrap();
    assert_eq!(result.rows, vec![vec![text("a;b")]]);
}

#[test]
fn test_execute_missing_sql_file() {
    let conn = db_with_customers().unwrap();
    let err = execute_sql_file(&conn, "/nonexistent/query.sql").unwrap_err();
    assert_eq!(
        err.downcast_ref::<io::Error>().map(io::Error::kind),
        Some(io::ErrorKind::NotFound)
    );
}

#[test]
fn test_execute_invalid_sql_file() {
    let conn = db_with_customers().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "bad.sql", "SELEKT * FORM users");

    let err = execute_sql_file(&conn, &path).unwrap_err();
    assert!(err.downcast_ref::<duckdb::Error>().is_some());
}
