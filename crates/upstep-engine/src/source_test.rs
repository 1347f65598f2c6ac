//! Tests for the directory and embedded script namespaces.

use super::*;
use std::fs;

// ── Helpers ────────────────────────────────────────────────────────────

fn write_script(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Fixture folder checked into the crate; see `fixtures/embedded/`.
#[derive(RustEmbed)]
#[folder = "fixtures/embedded/"]
struct Fixtures;

// ── DirSource ──────────────────────────────────────────────────────────

#[test]
fn dir_lists_sql_files_recursively_and_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "1.1.0/b.sql", "SELECT 1;");
    write_script(dir.path(), "1.1.0/a.sql", "SELECT 1;");
    write_script(dir.path(), "1.0.0/init.sql", "SELECT 1;");
    write_script(dir.path(), "1.0.0/nested/deep.sql", "SELECT 1;");

    let source = DirSource::new(dir.path());
    assert_eq!(
        source.list().unwrap(),
        vec![
            "1.0.0/init.sql",
            "1.0.0/nested/deep.sql",
            "1.1.0/a.sql",
            "1.1.0/b.sql",
        ]
    );
}

#[test]
fn dir_skips_non_sql_and_dotfiles() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "1.0.0/init.sql", "SELECT 1;");
    write_script(dir.path(), "1.0.0/readme.md", "docs");
    write_script(dir.path(), ".hidden/secret.sql", "SELECT 1;");
    write_script(dir.path(), "1.0.0/.draft.sql", "SELECT 1;");

    let source = DirSource::new(dir.path());
    assert_eq!(source.list().unwrap(), vec!["1.0.0/init.sql"]);
}

#[test]
fn dir_read_returns_full_text() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "1.0.0/init.sql", "-- header\nSELECT 1;\n");
    let source = DirSource::new(dir.path());
    assert_eq!(source.read("1.0.0/init.sql").unwrap(), "-- header\nSELECT 1;\n");
}

#[test]
fn dir_list_fails_for_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirSource::new(&dir.path().join("absent"));
    let err = source.list().unwrap_err();
    assert!(matches!(err, ExtractionError::List { .. }), "got {err}");
}

#[test]
fn dir_read_fails_for_missing_script() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirSource::new(dir.path());
    let err = source.read("1.0.0/ghost.sql").unwrap_err();
    assert!(matches!(err, ExtractionError::Read { .. }));
}

// ── EmbeddedSource ─────────────────────────────────────────────────────

#[test]
fn embedded_lists_only_sql_resources() {
    let source = EmbeddedSource::<Fixtures>::new();
    assert_eq!(
        source.list().unwrap(),
        vec!["1.0.0/init.sql", "1.1.0/widen.sql", "helpers/cleanup.sql"]
    );
}

#[test]
fn embedded_read_returns_resource_text() {
    let source = EmbeddedSource::<Fixtures>::new();
    let text = source.read("1.0.0/init.sql").unwrap();
    assert!(text.contains("CREATE TABLE embedded_items"));
}

#[test]
fn embedded_read_missing_resource_fails() {
    let source = EmbeddedSource::<Fixtures>::new();
    let err = source.read("9.9.9/ghost.sql").unwrap_err();
    assert!(matches!(err, ExtractionError::Read { .. }));
}
