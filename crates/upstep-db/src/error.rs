//! Error types for upstep-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// D001: Connection to the live database failed
    #[error("[D001] Database connection failed: {0}")]
    Connection(String),

    /// D002: A statement failed; carries the offending unit so the operator
    /// can locate it in the script
    #[error("[D002] SQL execution failed in statement `{statement}`: {source}")]
    Execution {
        statement: String,
        #[source]
        source: duckdb::Error,
    },

    /// D003: Transaction management failed
    #[error("[D003] Transaction failed: {0}")]
    Transaction(String),

    /// D004: A script stream could not be read
    #[error("[D004] Failed to read script '{name}': {source}")]
    ScriptRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// D005: Schema version bookkeeping failed
    #[error("[D005] Schema version query failed: {0}")]
    VersionQuery(String),
}

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;
