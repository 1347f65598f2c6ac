//! Tests for the directory-backed store.

use super::*;
use crate::entry::BackupKind;
use std::io::Read;

fn today_name(index: u32) -> String {
    crate::entry::backup_name(BackupKind::Routine, Utc::now().date_naive(), index)
}

#[test]
fn open_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("var").join("backups");
    let store = DirStore::open(&nested).unwrap();
    assert!(nested.is_dir());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn create_compresses_the_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("app.duckdb");
    let payload = b"not really a database, but bytes are bytes".repeat(100);
    std::fs::write(&db_file, &payload).unwrap();

    let store = DirStore::open(&dir.path().join("backups")).unwrap();
    let name = today_name(0);
    store.create(&name, &db_file).unwrap();

    let backup_path = store.dir().join(&name);
    assert!(backup_path.is_file());

    // Round the compressed copy back through a decoder.
    let mut decoder = flate2::read::GzDecoder::new(File::open(&backup_path).unwrap());
    let mut restored = Vec::new();
    decoder.read_to_end(&mut restored).unwrap();
    assert_eq!(restored, payload);
}

#[test]
fn create_fails_for_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::open(dir.path()).unwrap();
    let err = store
        .create(&today_name(0), &dir.path().join("absent.duckdb"))
        .unwrap_err();
    assert!(matches!(err, BackupError::Create { .. }), "got {err}");
}

#[test]
fn list_ignores_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::open(dir.path()).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();
    std::fs::write(dir.path().join("backup_garbage.gz"), "junk").unwrap();
    std::fs::write(dir.path().join("backup_2026-02-01.3.gz"), "data").unwrap();

    let entries = store.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "backup_2026-02-01.3.gz");
    assert_eq!(entries[0].index, 3);
    assert_eq!(entries[0].kind, BackupKind::Routine);
}

#[test]
fn remove_deletes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("app.duckdb");
    std::fs::write(&db_file, "payload").unwrap();

    let store = DirStore::open(&dir.path().join("backups")).unwrap();
    let name = today_name(0);
    store.create(&name, &db_file).unwrap();
    assert_eq!(store.list().unwrap().len(), 1);

    store.remove(&name).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(!store.dir().join(&name).exists());
}

#[test]
fn remove_missing_entry_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::open(dir.path()).unwrap();
    let err = store.remove("backup_2026-02-01.0.gz").unwrap_err();
    assert!(matches!(err, BackupError::Remove { .. }));
}
