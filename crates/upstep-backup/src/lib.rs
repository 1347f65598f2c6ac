//! upstep-backup - Backup rotation for upstep
//!
//! Compressed copies of the live database file, named
//! `<prefix><YYYY-MM-DD>.<index>.gz`, with per-kind retention caps.
//! Bookkeeping is re-derived from the backup directory on each call rather
//! than held in a registry.

pub mod entry;
pub mod error;
pub mod manager;
pub mod store;

pub use entry::{backup_name, parse_backup_name, BackupEntry, BackupKind};
pub use error::{BackupError, BackupResult};
pub use manager::{BackupManager, BackupPolicy};
pub use store::{BackupStore, DirStore};
