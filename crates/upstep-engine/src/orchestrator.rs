//! The startup state machine: read the persisted version, back up, migrate.

use crate::error::{EngineError, EngineResult};
use crate::extractor::extract_plan;
use crate::source::ScriptSource;
use std::path::{Path, PathBuf};
use upstep_backup::{BackupKind, BackupManager};
use upstep_core::{MigrationPlan, SchemaVersion};
use upstep_db::{executor, version_store, LiveDb};

/// Which startup path [`Engine::ensure_current`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPath {
    /// No database file existed; the full plan ran from version zero.
    Fresh,
    /// The persisted version already matched the target.
    UpToDate,
    /// The persisted version was behind; the pending plan ran.
    Migrated,
}

/// Summary of one [`Engine::ensure_current`] run.
#[derive(Debug)]
pub struct UpgradeReport {
    pub path: StartupPath,
    /// Version before the run (zero for a fresh database).
    pub from: SchemaVersion,
    /// Version actually reached. Equals the target unless no script
    /// introduces the target version itself.
    pub to: SchemaVersion,
    pub buckets_applied: usize,
    pub scripts_applied: usize,
    /// Backup created during this run, if any.
    pub backup: Option<String>,
}

/// The migration orchestrator.
///
/// Owns the script source and the backup manager, and opens the live
/// database on demand. Runs once, synchronously, on the startup thread
/// before the application touches the database.
pub struct Engine {
    db_path: PathBuf,
    target: SchemaVersion,
    source: Box<dyn ScriptSource>,
    backups: BackupManager,
}

impl Engine {
    pub fn new(
        db_path: PathBuf,
        target: SchemaVersion,
        source: Box<dyn ScriptSource>,
        backups: BackupManager,
    ) -> Self {
        Self {
            db_path,
            target,
            source,
            backups,
        }
    }

    pub fn target(&self) -> SchemaVersion {
        self.target
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Bring the database schema up to the target version.
    ///
    /// Decides between the fresh, up-to-date, behind, and ahead paths from
    /// the persisted version, then applies whatever the chosen path needs.
    /// Every bucket runs inside its own transaction together with its
    /// version row update, so a failure leaves the database at the last
    /// completed version.
    pub fn ensure_current(&mut self) -> EngineResult<UpgradeReport> {
        if let Some(dir) = self.db_path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| EngineError::Storage {
                path: dir.display().to_string(),
                source: e,
            })?;
        }

        // Opening creates the file, so existence must be sampled first.
        let fresh = !self.db_path.exists();
        let db = LiveDb::open(&self.db_path)?;
        version_store::ensure_version_table(db.conn())?;

        let current = if fresh {
            SchemaVersion::ZERO
        } else {
            self.read_persisted(&db)?
        };
        log::info!("schema check: current {current}, target {}", self.target);

        if !fresh {
            if current == self.target {
                // Startup must succeed here no matter what the backup does.
                let backup = self.routine_backup(&db);
                return Ok(UpgradeReport {
                    path: StartupPath::UpToDate,
                    from: current,
                    to: current,
                    buckets_applied: 0,
                    scripts_applied: 0,
                    backup,
                });
            }
            if current > self.target {
                return Err(EngineError::AheadOfTarget {
                    current,
                    target: self.target,
                });
            }
        } else if current == self.target {
            // Fresh database and a zero target: nothing to apply.
            return Ok(UpgradeReport {
                path: StartupPath::Fresh,
                from: current,
                to: current,
                buckets_applied: 0,
                scripts_applied: 0,
                backup: None,
            });
        }

        // Migrations are coming. An existing database gets its safety copy
        // first; this one failing is fatal.
        let mut backup = None;
        if !fresh {
            db.checkpoint()?;
            backup = Some(
                self.backups
                    .create_backup(BackupKind::PreMigration, &self.db_path)?,
            );
        }

        let plan = extract_plan(self.source.as_ref(), current, self.target)?;
        if plan.is_empty() {
            return Err(EngineError::NoScripts {
                current,
                target: self.target,
            });
        }

        let buckets = plan.into_buckets();
        let buckets_applied = buckets.len();
        let mut scripts_applied = 0;
        for bucket in &buckets {
            log::info!(
                "applying {} script(s) for version {}",
                bucket.scripts.len(),
                bucket.version
            );
            db.transaction(|conn| {
                for script in &bucket.scripts {
                    log::debug!("running migration script {}", script.name);
                    executor::run_script(conn, script)?;
                }
                version_store::write_version(conn, &bucket.version)
            })?;
            scripts_applied += bucket.scripts.len();
        }

        let reached = buckets.last().map(|b| b.version).unwrap_or(current);
        if reached != self.target {
            log::warn!(
                "migrated through {reached}, but no script introduces target {}",
                self.target
            );
        }

        Ok(UpgradeReport {
            path: if fresh {
                StartupPath::Fresh
            } else {
                StartupPath::Migrated
            },
            from: current,
            to: reached,
            buckets_applied,
            scripts_applied,
            backup,
        })
    }

    /// The persisted schema version.
    ///
    /// `None` when no database file exists yet. A database without a version
    /// row is an error, the same one `ensure_current` raises.
    pub fn current_version(&self) -> EngineResult<Option<SchemaVersion>> {
        if !self.db_path.exists() {
            return Ok(None);
        }
        let db = LiveDb::open(&self.db_path)?;
        version_store::ensure_version_table(db.conn())?;
        self.read_persisted(&db).map(Some)
    }

    /// The plan `ensure_current` would execute, without executing anything.
    pub fn pending_plan(&self) -> EngineResult<MigrationPlan> {
        let current = self.current_version()?.unwrap_or(SchemaVersion::ZERO);
        Ok(extract_plan(self.source.as_ref(), current, self.target)?)
    }

    /// Operator-forced routine backup, regardless of the delay check.
    pub fn force_backup(&mut self) -> EngineResult<String> {
        if !self.db_path.exists() {
            return Err(EngineError::DatabaseMissing {
                path: self.db_path.display().to_string(),
            });
        }
        let db = LiveDb::open(&self.db_path)?;
        db.checkpoint()?;
        Ok(self
            .backups
            .create_backup(BackupKind::Routine, &self.db_path)?)
    }

    fn read_persisted(&self, db: &LiveDb) -> EngineResult<SchemaVersion> {
        match version_store::read_version(db.conn())? {
            None => Err(EngineError::VersionMissing {
                path: self.db_path.display().to_string(),
            }),
            Some(value) => match SchemaVersion::parse(&value) {
                Ok(version) => Ok(version),
                Err(source) => Err(EngineError::VersionUnparsable { value, source }),
            },
        }
    }

    /// Up-to-date path backup check. Failures are logged and swallowed; a
    /// missed routine backup must not block startup.
    fn routine_backup(&mut self, db: &LiveDb) -> Option<String> {
        if let Err(e) = db.checkpoint() {
            log::warn!("routine backup skipped: {e}");
            return None;
        }
        match self.backups.run_routine(&self.db_path) {
            Ok(name) => name,
            Err(e) => {
                log::warn!("routine backup failed: {e}");
                None
            }
        }
    }
}
