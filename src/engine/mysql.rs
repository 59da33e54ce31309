//! MySQL engine.
//!
//! Connection parameters are compiled in. Edit the constants below to
//! point the application at your server.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::{
    Column, Connection, Executor, Row, Statement, TypeInfo, ValueRef,
    mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow},
};

use crate::SqlAdminResult;

const HOST: &str = "your_mysql_host";
const PORT: u16 = 3306;
const USER: &str = "your_mysql_user";
const PASSWORD: &str = "your_mysql_password";
const DATABASE: &str = "your_mysql_db";

/// Catalog query behind the `Show Tables` button.
const LIST_TABLES: &str = "SHOW TABLES;";

/// Opens a connection to the compiled-in server and schema.
pub async fn connect() -> SqlAdminResult<MySqlConnection> {
    let options = MySqlConnectOptions::new()
        .host(HOST)
        .port(PORT)
        .username(USER)
        .password(PASSWORD)
        .database(DATABASE);

    Ok(MySqlConnection::connect_with(&options).await?)
}

/// Runs a result-set query, returning column names and stringified rows.
///
/// The names come from the prepared statement, so a query matching zero
/// rows still reports its real header.
pub async fn fetch_select(
    conn: &mut MySqlConnection,
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
pub async fn execute(conn: &mut MySqlConnection, sql: &str) -> SqlAdminResult<u64> {
    let done = sqlx::query(sql).execute(&mut *conn).await?;

    Ok(done.rows_affected())
}

/// Table names of the connected schema.
pub async fn list_tables(conn: &mut MySqlConnection) -> SqlAdminResult<Vec<String>> {
    let rows = sqlx::query(LIST_TABLES).fetch_all(&mut *conn).await?;

    rows.iter()
        .map(|row| Ok(row.try_get::<String, _>(0)?))
        .collect()
}

fn decode_row(row: &MySqlRow) -> SqlAdminResult<Vec<String>> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

/// Converts one cell to display text, keyed on the server type name.
///
/// Only types with a known decoding are matched here; everything else
/// (DECIMAL, JSON, SET, ...) goes through the tolerant cascade so a
/// single exotic column cannot fail the whole query.
fn decode_cell(row: &MySqlRow, index: usize) -> SqlAdminResult<String> {
    if row.try_get_raw(index)?.is_null() {
        return Ok("NULL".to_string());
    }

    let type_name = row.column(index).type_info().name().to_string();

    let text = match type_name.as_str() {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get::<i64, _>(index)?.to_string()
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => row.try_get::<u64, _>(index)?.to_string(),
        "FLOAT" => row.try_get::<f32, _>(index)?.to_string(),
        "DOUBLE" => row.try_get::<f64, _>(index)?.to_string(),
        "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" => {
            row.try_get::<String, _>(index)?
        }
        "BOOLEAN" => row.try_get::<bool, _>(index)?.to_string(),
        "DATE" => row.try_get::<NaiveDate, _>(index)?.to_string(),
        // TIME is a signed duration; values NaiveTime cannot hold
        // fall back to the cascade.
        "TIME" => match row.try_get::<NaiveTime, _>(index) {
            Ok(time) => time.to_string(),
            Err(_) => decode_any(row, index, &type_name),
        },
        "DATETIME" => row.try_get::<NaiveDateTime, _>(index)?.to_string(),
        "TIMESTAMP" => row.try_get::<DateTime<Utc>, _>(index)?.to_string(),
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            format!("<{} bytes>", row.try_get::<Vec<u8>, _>(index)?.len())
        }
        _ => decode_any(row, index, &type_name),
    };

    Ok(text)
}

// String first: the exotic types that decode at all usually arrive as
// text on the wire.
fn decode_any(row: &MySqlRow, index: usize, type_name: &str) -> String {
    if let Ok(value) = row.try_get::<String, _>(index) {
        return value;
    }
    if let Ok(value) = row.try_get::<i64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<u64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<f64, _>(index) {
        return value.to_string();
    }
    if let Ok(value) = row.try_get::<bool, _>(index) {
        return value.to_string();
    }

    format!("[{type_name}]")
}
