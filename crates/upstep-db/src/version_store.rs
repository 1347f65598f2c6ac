//! Persisted schema version bookkeeping.
//!
//! The schema version lives as a single key/value row in
//! `upstep_meta.schema_info`, colocated with the application data it
//! describes so file and version can never drift apart.

use crate::error::{DbError, DbResult};
use duckdb::Connection;
use upstep_core::SchemaVersion;

const VERSION_KEY: &str = "schema_version";

/// Create the `upstep_meta` schema and `schema_info` table when absent.
pub fn ensure_version_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "CREATE SCHEMA IF NOT EXISTS upstep_meta;
         CREATE TABLE IF NOT EXISTS upstep_meta.schema_info (
             key   VARCHAR PRIMARY KEY,
             value VARCHAR NOT NULL
         );",
    )
    .map_err(|e| DbError::VersionQuery(format!("failed to create schema_info table: {e}")))
}

/// Read the persisted schema version string, if any.
///
/// Returns the raw stored text; parsing (and rejecting garbage) is the
/// caller's concern because the failure modes differ by call site.
pub fn read_version(conn: &Connection) -> DbResult<Option<String>> {
    match conn.query_row(
        "SELECT value FROM upstep_meta.schema_info WHERE key = ?",
        duckdb::params![VERSION_KEY],
        |row| row.get(0),
    ) {
        Ok(value) => Ok(Some(value)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DbError::VersionQuery(format!(
            "failed to read schema version: {e}"
        ))),
    }
}

/// Persist `version` as the current schema version.
pub fn write_version(conn: &Connection, version: &SchemaVersion) -> DbResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO upstep_meta.schema_info (key, value) VALUES (?, ?)",
        duckdb::params![VERSION_KEY, version.to_string()],
    )
    .map_err(|e| DbError::VersionQuery(format!("failed to record schema version: {e}")))?;
    Ok(())
}

#[cfg(test)]
#[path = "version_store_test.rs"]
mod tests;
