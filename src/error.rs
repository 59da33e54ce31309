use thiserror::Error;

/**
Result type to simplify function signatures.

Functions can return `SqlAdminResult<T>` and then use `?` to automatically
propagate errors.
*/
pub type SqlAdminResult<T> = Result<T, SqlAdminError>;

/**
Custom error type for SQL Admin.

Every variant ends up in the status line, which adds its own prefix.
The driver wrappers therefore render the driver message unchanged.
*/
#[derive(Error, Debug)]
pub enum SqlAdminError {
    // Wrapper for standard IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Wrapper for sqlx errors (SQLite and MySQL).
    // The #[from] attribute automatically converts sqlx::Error to SqlAdminError::Sql.
    #[error("{0}")]
    Sql(#[from] sqlx::Error),

    // Wrapper for Oracle driver errors.
    #[cfg(feature = "oracle")]
    #[error("{0}")]
    Oracle(#[from] oracle::Error),

    // The startup connection failed, so there is nothing to run queries on.
    // The connection is only opened once; restarting the application retries it.
    #[error("not connected to a database")]
    NotConnected,

    // The requested engine was excluded from this build by a cargo feature.
    #[error("{0} support was not compiled into this build")]
    EngineDisabled(&'static str),
}
