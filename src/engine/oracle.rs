//! Oracle engine, backed by the blocking `oracle` driver.
//!
//! Connection parameters are compiled in. Edit the constants below to
//! point the application at your server. The Oracle Instant Client
//! libraries must be installed at runtime.

use crate::SqlAdminResult;

pub use oracle::Connection as OracleConnection;

const HOST: &str = "your_oracle_host";
const PORT: u16 = 1521;
const SERVICE: &str = "your_service";
const USER: &str = "your_username";
const PASSWORD: &str = "your_password";

// Statements must not end in ';' here: the driver passes them to the
// server verbatim and Oracle rejects the terminator (ORA-00911).
const LIST_TABLES: &str = "SELECT table_name FROM user_tables";

/// EZConnect descriptor for the compiled-in server.
fn connect_string() -> String {
    format!("//{HOST}:{PORT}/{SERVICE}")
}

/// Opens a session on the compiled-in server.
pub fn connect() -> SqlAdminResult<OracleConnection> {
    Ok(OracleConnection::connect(USER, PASSWORD, connect_string())?)
}

/// Runs a result-set query, returning column names and stringified rows.
///
/// Every value is fetched through Oracle's own to-text conversion, with
/// `NULL` rendered literally.
pub fn fetch_select(
    conn: &OracleConnection,
    sql: &str,
) -> SqlAdminResult<(Vec<String>, Vec<Vec<String>>)> {
    let result_set = conn.query(sql, &[])?;

    // Collected up front: iterating consumes the result set.
    let columns: Vec<String> = result_set
        .column_info()
        .iter()
        .map(|info| info.name().to_string())
        .collect();

    let mut rows = Vec::new();
    for row in result_set {
        let row = row?;

        let mut cells = Vec::with_capacity(columns.len());
        for index in 0..columns.len() {
            let value: Option<String> = row.get(index)?;
            cells.push(value.unwrap_or_else(|| "NULL".to_string()));
        }

        rows.push(cells);
    }

    Ok((columns, rows))
}

/// Runs a statement without a result set, commits and reports the
/// affected rows. The driver never autocommits.
pub fn execute(conn: &OracleConnection, sql: &str) -> SqlAdminResult<u64> {
    let statement = conn.execute(sql, &[])?;
    let affected = statement.row_count()?;
    conn.commit()?;

    Ok(affected)
}

/// Table names owned by the connected user.
pub fn list_tables(conn: &OracleConnection) -> SqlAdminResult<Vec<String>> {
    let result_set = conn.query(LIST_TABLES, &[])?;

    let mut tables = Vec::new();
    for row in result_set {
        let row = row?;
        let name: String = row.get(0)?;
        tables.push(name);
    }

    Ok(tables)
}
