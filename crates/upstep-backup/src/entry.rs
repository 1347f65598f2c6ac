//! Backup kinds, the filename convention, and parsed directory entries.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Extension of compressed backup files.
pub const BACKUP_EXT: &str = ".gz";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two backup policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackupKind {
    /// Periodic safety copy, taken when the schema is already current.
    Routine,
    /// Mandatory safety copy, taken immediately before migrations run.
    PreMigration,
}

impl BackupKind {
    /// Filename prefix. Neither prefix starts the other, so a name maps to
    /// exactly one kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            BackupKind::Routine => "backup_",
            BackupKind::PreMigration => "premigration_",
        }
    }
}

impl fmt::Display for BackupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupKind::Routine => write!(f, "routine"),
            BackupKind::PreMigration => write!(f, "pre-migration"),
        }
    }
}

/// One backup file, as reconstructed from its name and file metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub name: String,
    pub kind: BackupKind,
    /// Creation date encoded in the name.
    pub date: NaiveDate,
    /// Per-day counter encoded in the name.
    pub index: u32,
    /// Filesystem timestamp; age checks and eviction order use this.
    pub created: DateTime<Utc>,
}

/// Compose the backup filename `<prefix><YYYY-MM-DD>.<index>.gz`.
pub fn backup_name(kind: BackupKind, date: NaiveDate, index: u32) -> String {
    format!(
        "{}{}.{}{}",
        kind.prefix(),
        date.format(DATE_FORMAT),
        index,
        BACKUP_EXT
    )
}

/// Parse a directory entry name back into its parts.
///
/// Returns `None` for names outside the convention; foreign files may live
/// in the backup directory and are simply ignored.
pub fn parse_backup_name(name: &str) -> Option<(BackupKind, NaiveDate, u32)> {
    let (kind, rest) = if let Some(rest) = name.strip_prefix(BackupKind::Routine.prefix()) {
        (BackupKind::Routine, rest)
    } else if let Some(rest) = name.strip_prefix(BackupKind::PreMigration.prefix()) {
        (BackupKind::PreMigration, rest)
    } else {
        return None;
    };
    let rest = rest.strip_suffix(BACKUP_EXT)?;
    let (date_part, index_part) = rest.rsplit_once('.')?;
    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()?;
    let index = index_part.parse().ok()?;
    Some((kind, date, index))
}

#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;
