//! Backup scheduling, naming, and retention.

use crate::entry::{backup_name, BackupEntry, BackupKind};
use crate::error::BackupResult;
use crate::store::{BackupStore, DirStore};
use chrono::{Duration, NaiveDate, Utc};
use std::collections::HashMap;
use std::path::Path;

/// Rotation policy: per-kind retention caps and the routine delay threshold.
#[derive(Debug, Clone, Copy)]
pub struct BackupPolicy {
    /// Maximum number of routine backups kept.
    pub routine_retention: usize,
    /// Maximum number of pre-migration backups kept.
    pub premigration_retention: usize,
    /// A routine backup is due once the oldest one is older than this.
    pub delay_days: i64,
}

impl Default for BackupPolicy {
    fn default() -> Self {
        Self {
            routine_retention: 5,
            premigration_retention: 3,
            delay_days: 7,
        }
    }
}

impl BackupPolicy {
    fn retention(&self, kind: BackupKind) -> usize {
        match kind {
            BackupKind::Routine => self.routine_retention,
            BackupKind::PreMigration => self.premigration_retention,
        }
    }
}

/// Creates and rotates compressed copies of the live database file.
///
/// Bookkeeping is re-derived from the store on every call. The only
/// in-memory state is the per-run index floor, which keeps an index from
/// being handed out twice in one process run even when the file that held
/// it was deleted in between.
pub struct BackupManager {
    store: Box<dyn BackupStore>,
    policy: BackupPolicy,
    session_floor: HashMap<(BackupKind, NaiveDate), u32>,
}

impl BackupManager {
    /// Directory-backed manager rooted at `dir`, created when absent.
    pub fn open(dir: &Path, policy: BackupPolicy) -> BackupResult<Self> {
        Ok(Self::with_store(Box::new(DirStore::open(dir)?), policy))
    }

    /// Manager over an explicit store.
    pub fn with_store(store: Box<dyn BackupStore>, policy: BackupPolicy) -> Self {
        Self {
            store,
            policy,
            session_floor: HashMap::new(),
        }
    }

    pub fn policy(&self) -> &BackupPolicy {
        &self.policy
    }

    /// Entries of `kind`, oldest first. Name breaks timestamp ties.
    pub fn entries(&self, kind: BackupKind) -> BackupResult<Vec<BackupEntry>> {
        let mut entries: Vec<BackupEntry> = self
            .store
            .list()?
            .into_iter()
            .filter(|e| e.kind == kind)
            .collect();
        entries.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }

    /// Whether a routine backup is due: none exists yet, or the oldest one
    /// is more than `delay_days` days old.
    pub fn routine_due(&self) -> BackupResult<bool> {
        let entries = self.entries(BackupKind::Routine)?;
        Ok(match entries.first() {
            None => true,
            Some(oldest) => Utc::now() - oldest.created > Duration::days(self.policy.delay_days),
        })
    }

    /// Run the once-per-startup routine check; returns the created backup
    /// name when one was due.
    pub fn run_routine(&mut self, db_file: &Path) -> BackupResult<Option<String>> {
        if !self.routine_due()? {
            log::debug!("routine backup not due yet");
            return Ok(None);
        }
        Ok(Some(self.create_backup(BackupKind::Routine, db_file)?))
    }

    /// Create a backup of `db_file` under `kind`.
    ///
    /// The index is fixed before eviction so a deleted file's index cannot
    /// be resurrected; eviction then brings the count below the cap so the
    /// new file lands within it.
    pub fn create_backup(&mut self, kind: BackupKind, db_file: &Path) -> BackupResult<String> {
        let today = Utc::now().date_naive();
        let index = self.next_index(kind, today)?;
        self.evict_to_cap(kind)?;

        let name = backup_name(kind, today, index);
        self.store.create(&name, db_file)?;
        self.session_floor.insert((kind, today), index + 1);
        log::info!("created {kind} backup {name}");
        Ok(name)
    }

    /// Next free per-day index: one past the highest index found in the
    /// store for `(kind, date)`, clamped up by the session floor. Gaps from
    /// manual deletion are tolerated, not refilled.
    fn next_index(&self, kind: BackupKind, date: NaiveDate) -> BackupResult<u32> {
        let scanned = self
            .store
            .list()?
            .into_iter()
            .filter(|e| e.kind == kind && e.date == date)
            .map(|e| e.index)
            .max()
            .map_or(0, |max| max + 1);
        let floor = self.session_floor.get(&(kind, date)).copied().unwrap_or(0);
        Ok(scanned.max(floor))
    }

    /// Evict oldest entries of `kind` until a new backup would fit the cap.
    fn evict_to_cap(&mut self, kind: BackupKind) -> BackupResult<()> {
        let cap = self.policy.retention(kind);
        let mut entries = self.entries(kind)?;
        while entries.len() >= cap && !entries.is_empty() {
            let oldest = entries.remove(0);
            log::debug!("evicting {kind} backup {}", oldest.name);
            self.store.remove(&oldest.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
