//! upstep-db - DuckDB access layer for upstep
//!
//! Owns the live database connection, the persisted schema version row, and
//! migration script execution.

pub mod connection;
pub mod error;
pub mod executor;
pub mod version_store;

pub use connection::LiveDb;
pub use error::{DbError, DbResult};
pub use executor::{run_script, split_statements, SplitScript};
