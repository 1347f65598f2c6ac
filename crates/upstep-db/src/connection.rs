//! Live database connection wrapper.
//!
//! [`LiveDb`] owns the DuckDB [`Connection`] to the application database and
//! provides helpers for opening, transacting, and checkpointing.

use crate::error::{DbError, DbResult};
use duckdb::Connection;
use std::path::Path;

/// Wrapper around the one connection the migration engine holds to the live
/// application database.
///
/// Single-threaded: the engine runs on the startup thread before any
/// application workload, so no `Mutex` is needed.
pub struct LiveDb {
    conn: Connection,
}

impl LiveDb {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::Connection(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create an in-memory database.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Fold the write-ahead log into the database file.
    ///
    /// Run before a backup copies the file so the copy is self-contained.
    pub fn checkpoint(&self) -> DbResult<()> {
        self.conn.execute_batch("CHECKPOINT").map_err(|e| DbError::Execution {
            statement: "CHECKPOINT".to_string(),
            source: e,
        })
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    ///
    /// Each migration bucket runs through here so its scripts and the version
    /// row update land atomically.
    pub fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::Transaction(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(DbError::Transaction(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
