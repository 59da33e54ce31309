//! Supported database engines and the single connection used per session.

use clap::ValueEnum;
use std::{fmt, path::Path};

use crate::{SqlAdminResult, is_select};

#[cfg(feature = "mysql")]
mod mysql;
#[cfg(feature = "oracle")]
mod oracle;
mod sqlite;

/// Database engine selected on the command line.
///
/// Every engine is always selectable; picking one that was compiled out
/// fails at connection time instead of at argument parsing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatabaseKind {
    #[default]
    Sqlite,
    Mysql,
    Oracle,
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatabaseKind::Sqlite => "SQLite",
            DatabaseKind::Mysql => "MySQL",
            DatabaseKind::Oracle => "Oracle",
        };

        write!(f, "{name}")
    }
}

/// Outcome of one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// A result set with its header, every cell already stringified.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A statement without a result set.
    Done { rows_affected: u64 },
}

/// A live connection to one of the supported engines.
///
/// Exactly one is opened at startup and reused for every operation
/// until the application exits.
pub enum DbConnection {
    Sqlite(sqlx::SqliteConnection),
    #[cfg(feature = "mysql")]
    Mysql(sqlx::MySqlConnection),
    #[cfg(feature = "oracle")]
    Oracle(oracle::OracleConnection),
}

impl DbConnection {
    /// Opens a connection for `kind`.
    ///
    /// The path is only used by SQLite; MySQL and Oracle read their
    /// compiled-in credentials.
    pub async fn open(kind: DatabaseKind, sqlite_path: &Path) -> SqlAdminResult<Self> {
        tracing::debug!("fn open()\nkind: {kind}\nsqlite_path: {sqlite_path:#?}");

        match kind {
            DatabaseKind::Sqlite => Ok(DbConnection::Sqlite(sqlite::connect(sqlite_path).await?)),

            #[cfg(feature = "mysql")]
            DatabaseKind::Mysql => Ok(DbConnection::Mysql(mysql::connect().await?)),
            #[cfg(not(feature = "mysql"))]
            DatabaseKind::Mysql => Err(crate::SqlAdminError::EngineDisabled("MySQL")),

            #[cfg(feature = "oracle")]
            DatabaseKind::Oracle => Ok(DbConnection::Oracle(oracle::connect()?)),
            #[cfg(not(feature = "oracle"))]
            DatabaseKind::Oracle => Err(crate::SqlAdminError::EngineDisabled("Oracle")),
        }
    }

    /// Runs one statement, routed on its `SELECT` prefix: result sets
    /// are fetched in full, anything else reports affected rows.
    pub async fn run_query(&mut self, sql: &str) -> SqlAdminResult<QueryOutput> {
        tracing::debug!("fn run_query()\nsql: {sql}");

        if is_select(sql) {
            let (columns, rows) = match self {
                DbConnection::Sqlite(conn) => sqlite::fetch_select(conn, sql).await?,
                #[cfg(feature = "mysql")]
                DbConnection::Mysql(conn) => mysql::fetch_select(conn, sql).await?,
                #[cfg(feature = "oracle")]
                DbConnection::Oracle(conn) => oracle::fetch_select(conn, sql)?,
            };

            Ok(QueryOutput::Rows { columns, rows })
        } else {
            let rows_affected = match self {
                DbConnection::Sqlite(conn) => sqlite::execute(conn, sql).await?,
                #[cfg(feature = "mysql")]
                DbConnection::Mysql(conn) => mysql::execute(conn, sql).await?,
                #[cfg(feature = "oracle")]
                DbConnection::Oracle(conn) => oracle::execute(conn, sql)?,
            };

            Ok(QueryOutput::Done { rows_affected })
        }
    }

    /// Fresh table listing for the sidebar; nothing is cached.
    pub async fn list_tables(&mut self) -> SqlAdminResult<Vec<String>> {
        match self {
            DbConnection::Sqlite(conn) => sqlite::list_tables(conn).await,
            #[cfg(feature = "mysql")]
            DbConnection::Mysql(conn) => mysql::list_tables(conn).await,
            #[cfg(feature = "oracle")]
            DbConnection::Oracle(conn) => oracle::list_tables(conn),
        }
    }
}

#[cfg(test)]
mod tests_engine {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn engine_names_match_the_status_messages() {
        assert_eq!(DatabaseKind::Sqlite.to_string(), "SQLite");
        assert_eq!(DatabaseKind::Mysql.to_string(), "MySQL");
        assert_eq!(DatabaseKind::Oracle.to_string(), "Oracle");
    }

    #[test]
    fn sqlite_is_the_default_engine() {
        assert_eq!(DatabaseKind::default(), DatabaseKind::Sqlite);
    }

    #[tokio::test]
    async fn sqlite_round_trip_through_the_dispatcher() -> SqlAdminResult<()> {
        let dir = TempDir::new()?;
        let mut conn = DbConnection::open(DatabaseKind::Sqlite, &dir.path().join("t.db")).await?;

        conn.run_query("CREATE TABLE t (v INTEGER);").await?;

        let done = conn.run_query("INSERT INTO t (v) VALUES (7), (8);").await?;
        assert_eq!(done, QueryOutput::Done { rows_affected: 2 });

        let output = conn.run_query("SELECT v FROM t ORDER BY v;").await?;
        assert_eq!(
            output,
            QueryOutput::Rows {
                columns: vec!["v".to_string()],
                rows: vec![vec!["7".to_string()], vec!["8".to_string()]],
            }
        );

        assert_eq!(conn.list_tables().await?, ["t"]);
        Ok(())
    }
}
