//! Backup storage backends.
//!
//! [`BackupStore`] is the seam between rotation logic and the filesystem:
//! production uses [`DirStore`] (one flat directory of `.gz` files), tests
//! swap in an in-memory store with fabricated timestamps.

use crate::entry::{parse_backup_name, BackupEntry};
use crate::error::{BackupError, BackupResult};
use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Storage backend for backup files.
pub trait BackupStore {
    /// Every recognizable backup entry, in no particular order.
    fn list(&self) -> BackupResult<Vec<BackupEntry>>;

    /// Compress `db_file` into a new entry called `name`.
    fn create(&self, name: &str, db_file: &Path) -> BackupResult<()>;

    /// Delete the entry called `name`.
    fn remove(&self, name: &str) -> BackupResult<()>;
}

/// Directory-backed store.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Open the store, creating `dir` when absent.
    pub fn open(dir: &Path) -> BackupResult<Self> {
        std::fs::create_dir_all(dir).map_err(|e| BackupError::List {
            path: dir.display().to_string(),
            source: e,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn list_error(&self, source: io::Error) -> BackupError {
        BackupError::List {
            path: self.dir.display().to_string(),
            source,
        }
    }
}

impl BackupStore for DirStore {
    fn list(&self) -> BackupResult<Vec<BackupEntry>> {
        let mut entries = Vec::new();
        for dirent in std::fs::read_dir(&self.dir).map_err(|e| self.list_error(e))? {
            let dirent = dirent.map_err(|e| self.list_error(e))?;
            let file_name = dirent.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some((kind, date, index)) = parse_backup_name(name) else {
                continue;
            };
            let modified = dirent
                .metadata()
                .and_then(|m| m.modified())
                .map_err(|e| self.list_error(e))?;
            entries.push(BackupEntry {
                name: name.to_string(),
                kind,
                date,
                index,
                created: DateTime::<Utc>::from(modified),
            });
        }
        Ok(entries)
    }

    fn create(&self, name: &str, db_file: &Path) -> BackupResult<()> {
        let create_error = |source| BackupError::Create {
            name: name.to_string(),
            source,
        };
        let mut input = File::open(db_file).map_err(create_error)?;
        let output = File::create(self.dir.join(name)).map_err(create_error)?;
        // Stream-copy through the encoder; the database file never loads
        // into memory whole.
        let mut encoder = GzEncoder::new(output, Compression::default());
        io::copy(&mut input, &mut encoder).map_err(create_error)?;
        encoder.finish().map_err(create_error)?;
        Ok(())
    }

    fn remove(&self, name: &str) -> BackupResult<()> {
        std::fs::remove_file(self.dir.join(name)).map_err(|e| BackupError::Remove {
            name: name.to_string(),
            source: e,
        })
    }
}

/// In-memory store for rotation tests: entries carry fabricated timestamps
/// and no file ever gets written.
#[cfg(test)]
pub(crate) struct MemoryStore {
    entries: std::sync::Mutex<Vec<BackupEntry>>,
    clock: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl MemoryStore {
    /// Deterministic base instant for fabricated `created` stamps.
    const EPOCH: i64 = 1_700_000_000;

    pub(crate) fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    pub(crate) fn with_entries(entries: Vec<BackupEntry>) -> Self {
        Self {
            entries: std::sync::Mutex::new(entries),
            clock: std::sync::atomic::AtomicI64::new(0),
        }
    }

    /// Names currently held, sorted for stable assertions.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
impl BackupStore for MemoryStore {
    fn list(&self) -> BackupResult<Vec<BackupEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn create(&self, name: &str, _db_file: &Path) -> BackupResult<()> {
        let (kind, date, index) = parse_backup_name(name).ok_or_else(|| BackupError::Create {
            name: name.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "unparseable backup name"),
        })?;
        // Strictly increasing timestamps so eviction order is unambiguous.
        let tick = self
            .clock
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let created = DateTime::from_timestamp(Self::EPOCH + tick, 0).unwrap_or_else(Utc::now);
        self.entries.lock().unwrap().push(BackupEntry {
            name: name.to_string(),
            kind,
            date,
            index,
            created,
        });
        Ok(())
    }

    fn remove(&self, name: &str) -> BackupResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.name != name);
        if entries.len() == before {
            return Err(BackupError::Remove {
                name: name.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such entry"),
            });
        }
        Ok(())
    }
}

// Lets a test keep a handle to the store after the manager boxes it.
#[cfg(test)]
impl BackupStore for std::sync::Arc<MemoryStore> {
    fn list(&self) -> BackupResult<Vec<BackupEntry>> {
        self.as_ref().list()
    }

    fn create(&self, name: &str, db_file: &Path) -> BackupResult<()> {
        self.as_ref().create(name, db_file)
    }

    fn remove(&self, name: &str) -> BackupResult<()> {
        self.as_ref().remove(name)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
