use super::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use upstep_core::{Config, SchemaVersion};

fn write_project(root: &Path, target: &str) {
    let config = format!(
        "name: demo\ntarget_version: \"{target}\"\n",
    );
    fs::write(root.join("upstep.yml"), config).unwrap();

    let scripts = root.join("migrations");
    fs::create_dir_all(scripts.join("1.0.0")).unwrap();
    fs::create_dir_all(scripts.join("1.1.0")).unwrap();
    fs::write(
        scripts.join("1.0.0/baseline.sql"),
        "CREATE TABLE t (id INTEGER);\n",
    )
    .unwrap();
    fs::write(
        scripts.join("1.1.0/more.sql"),
        "CREATE TABLE u (id INTEGER);\n",
    )
    .unwrap();
}

fn global_for(root: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: root.to_string_lossy().into_owned(),
        config: None,
    }
}

fn current_version(root: &Path) -> Option<SchemaVersion> {
    let config = Config::load_from_dir(root).unwrap();
    let engine = build_engine(&config, root).unwrap();
    engine.current_version().unwrap()
}

#[test]
fn up_bootstraps_a_fresh_project() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), "1.1.0");

    let args = UpArgs {
        target_version: None,
    };
    execute(&args, &global_for(dir.path())).unwrap();

    assert!(dir.path().join("data/app.duckdb").exists());
    assert_eq!(
        current_version(dir.path()),
        Some(SchemaVersion::new(1, 1, 0))
    );
}

#[test]
fn up_twice_is_idempotent() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), "1.1.0");
    let global = global_for(dir.path());

    let args = UpArgs {
        target_version: None,
    };
    execute(&args, &global).unwrap();
    execute(&args, &global).unwrap();

    assert_eq!(
        current_version(dir.path()),
        Some(SchemaVersion::new(1, 1, 0))
    );
}

#[test]
fn up_honors_target_override() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), "1.1.0");

    let args = UpArgs {
        target_version: Some("1.0.0".to_string()),
    };
    execute(&args, &global_for(dir.path())).unwrap();

    assert_eq!(
        current_version(dir.path()),
        Some(SchemaVersion::new(1, 0, 0))
    );
}

#[test]
fn up_rejects_malformed_target_override() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), "1.1.0");

    let args = UpArgs {
        target_version: Some("not-a-version".to_string()),
    };
    assert!(execute(&args, &global_for(dir.path())).is_err());
    // Nothing was created.
    assert!(!dir.path().join("data/app.duckdb").exists());
}

#[test]
fn up_fails_without_a_config() {
    let dir = tempdir().unwrap();
    let args = UpArgs {
        target_version: None,
    };
    assert!(execute(&args, &global_for(dir.path())).is_err());
}
