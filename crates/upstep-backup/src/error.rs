//! Error types for upstep-backup

use thiserror::Error;

/// Backup creation and rotation errors
#[derive(Error, Debug)]
pub enum BackupError {
    /// B001: Backup directory could not be prepared or listed
    #[error("[B001] Failed to list backup directory '{path}': {source}")]
    List {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// B002: Backup file could not be written
    #[error("[B002] Failed to create backup '{name}': {source}")]
    Create {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// B003: Backup file could not be removed during eviction
    #[error("[B003] Failed to remove backup '{name}': {source}")]
    Remove {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for backup operations
pub type BackupResult<T> = Result<T, BackupError>;
