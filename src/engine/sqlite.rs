//! SQLite engine: a single file-backed connection, created on demand.

use sqlx::{
    Column, Connection, Executor, Row, Statement, TypeInfo, ValueRef,
    sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow},
};
use std::path::Path;

use crate::SqlAdminResult;

/// Catalog query behind the `Show Tables` button.
const LIST_TABLES: &str = "SELECT name FROM sqlite_master WHERE type='table';";

/// Opens the database file, creating it if it does not exist yet.
pub async fn connect(path: &Path) -> SqlAdminResult<SqliteConnection> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    Ok(SqliteConnection::connect_with(&options).await?)
}

/// Runs a result-set query, returning column names and stringified rows.
///
/// The names come from the prepared statement, so a query matching zero
/// rows still reports its real header.
pub async fn fetch_select(
    conn: &mut SqliteConnection,
    sql: &str,
) -> SqlAdminResult<(Vec<String>, Vec<Vec<String>>)> {
    let statement = conn.prepare(sql).await?;

    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    let rows = statement.query().fetch_all(&mut *conn).await?;
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(decode_row)
        .collect::<SqlAdminResult<_>>()?;

    Ok((columns, rows))
}

/// Runs a statement without a result set and reports the affected rows.
pub async fn execute(conn: &mut SqliteConnection, sql: &str) -> SqlAdminResult<u64> {
    let done = sqlx::query(sql).execute(&mut *conn).await?;

    Ok(done.rows_affected())
}

/// Table names straight from the catalog, in creation order.
pub async fn list_tables(conn: &mut SqliteConnection) -> SqlAdminResult<Vec<String>> {
    let rows = sqlx::query(LIST_TABLES).fetch_all(&mut *conn).await?;

    rows.iter()
        .map(|row| Ok(row.try_get::<String, _>(0)?))
        .collect()
}

fn decode_row(row: &SqliteRow) -> SqlAdminResult<Vec<String>> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

/// Converts one cell to display text.
///
/// `NULL` is rendered literally. SQLite columns are dynamically typed,
/// so unknown declared types fall back through the storage classes.
fn decode_cell(row: &SqliteRow, index: usize) -> SqlAdminResult<String> {
    if row.try_get_raw(index)?.is_null() {
        return Ok("NULL".to_string());
    }

    let type_name = row.column(index).type_info().name().to_string();

    let text = match type_name.as_str() {
        "INTEGER" | "BIGINT" | "INT" => row.try_get::<i64, _>(index)?.to_string(),
        "REAL" | "FLOAT" | "DOUBLE" => row.try_get::<f64, _>(index)?.to_string(),
        "TEXT" | "VARCHAR" | "CHAR" | "CLOB" => row.try_get::<String, _>(index)?,
        "BOOLEAN" | "BOOL" => row.try_get::<bool, _>(index)?.to_string(),
        "DATE" | "DATETIME" | "TIMESTAMP" => row.try_get::<String, _>(index)?,
        "BLOB" => format!("<{} bytes>", row.try_get::<Vec<u8>, _>(index)?.len()),
        _ => decode_any(row, index, &type_name),
    };

    Ok(text)
}

// Last resort for declared types not matched above (NUMERIC, expression
// columns and so on): try the storage classes one by one.
fn decode_any(row: &SqliteRow, index: usize, type_name: &str) -> String {
    if let Ok(value) = row.try_get::<i64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<f64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<String, _>(index) {
        return value;
    }
    if let Ok(value) = row.try_get::<bool, _>(index) {
        return value.to_string();
    }

    format!("[{type_name}]")
}
