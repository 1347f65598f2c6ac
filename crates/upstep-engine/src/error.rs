//! Error types for upstep-engine

use thiserror::Error;
use upstep_core::{SchemaVersion, VersionError};

/// Script namespace enumeration and read failures
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// X001: The script namespace could not be enumerated
    #[error("[X001] Failed to list migration scripts under '{path}': {source}")]
    List {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// X002: A selected script could not be read
    #[error("[X002] Failed to read migration script '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// X003: An embedded script is not valid UTF-8
    #[error("[X003] Migration script '{name}' is not valid UTF-8")]
    InvalidUtf8 { name: String },
}

/// Fatal startup errors surfaced by the orchestrator
#[derive(Error, Debug)]
pub enum EngineError {
    /// U001: Storage directory could not be prepared
    #[error("[U001] Failed to prepare storage directory '{path}': {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// U002: The database file does not exist where one is required
    #[error("[U002] Database file '{path}' does not exist")]
    DatabaseMissing { path: String },

    /// U003: Database file exists but records no schema version
    #[error("[U003] Database '{path}' has no recorded schema version; refusing to guess")]
    VersionMissing { path: String },

    /// U004: The persisted schema version does not parse
    #[error("[U004] Persisted schema version '{value}' is invalid: {source}")]
    VersionUnparsable {
        value: String,
        #[source]
        source: VersionError,
    },

    /// U005: Database is ahead of what this build understands
    #[error(
        "[U005] Database schema {current} is newer than application target {target}; \
         refusing to start"
    )]
    AheadOfTarget {
        current: SchemaVersion,
        target: SchemaVersion,
    },

    /// U006: Behind target but no script covers the gap
    #[error("[U006] No migration scripts found between {current} and {target}")]
    NoScripts {
        current: SchemaVersion,
        target: SchemaVersion,
    },

    #[error(transparent)]
    Db(#[from] upstep_db::DbError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Backup(#[from] upstep_backup::BackupError),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
