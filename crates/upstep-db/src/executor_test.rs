//! Tests for the statement splitter and script runner.

use super::*;
use crate::LiveDb;
use upstep_core::{MigrationScript, SchemaVersion};

// ── Helpers ────────────────────────────────────────────────────────────

fn units(sql: &str) -> Vec<String> {
    split_statements(sql.as_bytes()).unwrap().units
}

fn residue(sql: &str) -> Option<String> {
    split_statements(sql.as_bytes()).unwrap().residue
}

fn script(name: &str, sql: &str) -> MigrationScript {
    MigrationScript {
        version: SchemaVersion::new(1, 0, 0),
        name: name.to_string(),
        sql: sql.to_string(),
    }
}

fn count(db: &LiveDb, sql: &str) -> i64 {
    db.conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

// ── Splitting ──────────────────────────────────────────────────────────

#[test]
fn single_statement_single_line() {
    assert_eq!(units("SELECT 1;"), vec!["SELECT 1;"]);
}

#[test]
fn full_line_comment_is_dropped() {
    let sql = "-- header comment\nSELECT 1;";
    assert_eq!(units(sql), vec!["SELECT 1;"]);
}

#[test]
fn trailing_comment_is_stripped() {
    let sql = "SELECT 1; -- inline note";
    assert_eq!(units(sql), vec!["SELECT 1;"]);
}

#[test]
fn multiline_statement_joins_with_single_space() {
    let sql = "CREATE TABLE t (\n    id   INTEGER,\n    name VARCHAR\n);";
    assert_eq!(
        units(sql),
        vec!["CREATE TABLE t ( id INTEGER, name VARCHAR );"]
    );
}

#[test]
fn several_statements_become_several_units() {
    let sql = "CREATE TABLE a (x INTEGER);\n\nCREATE TABLE b (y INTEGER);\n";
    assert_eq!(
        units(sql),
        vec!["CREATE TABLE a (x INTEGER);", "CREATE TABLE b (y INTEGER);"]
    );
}

#[test]
fn statements_sharing_a_line_stay_one_unit() {
    // The delimiter check is per line, so both statements land in one unit;
    // the batch executor runs them both.
    assert_eq!(units("SELECT 1; SELECT 2;"), vec!["SELECT 1; SELECT 2;"]);
}

#[test]
fn comment_only_script_yields_nothing() {
    let sql = "-- nothing here\n-- nor here\n";
    let split = split_statements(sql.as_bytes()).unwrap();
    assert!(split.units.is_empty());
    assert_eq!(split.residue, None);
}

#[test]
fn blank_lines_produce_no_units() {
    assert_eq!(units("\n\n  \nSELECT 1;\n\n"), vec!["SELECT 1;"]);
}

#[test]
fn trailing_content_without_delimiter_is_residue() {
    let sql = "SELECT 1;\nSELECT 2 -- no closing delimiter\n";
    let split = split_statements(sql.as_bytes()).unwrap();
    assert_eq!(split.units, vec!["SELECT 1;"]);
    assert_eq!(split.residue.as_deref(), Some("SELECT 2"));
}

#[test]
fn comment_between_statement_lines() {
    let sql = "INSERT INTO t\n-- values below\nVALUES (1);";
    assert_eq!(units(sql), vec!["INSERT INTO t VALUES (1);"]);
}

#[test]
fn indented_comment_after_content_is_stripped_mid_statement() {
    let sql = "SELECT a, -- first column\n       b\nFROM t;";
    assert_eq!(units(sql), vec!["SELECT a, b FROM t;"]);
}

#[test]
fn no_residue_for_whitespace_tail() {
    assert_eq!(residue("SELECT 1;\n   \n"), None);
}

// ── Execution ──────────────────────────────────────────────────────────

#[test]
fn run_script_applies_all_units() {
    let db = LiveDb::open_memory().unwrap();
    let sql = "\
-- widget table
CREATE TABLE widgets (
    id   INTEGER,
    name VARCHAR
);

INSERT INTO widgets VALUES (1, 'anvil'); -- seed row
INSERT INTO widgets VALUES (2, 'hammer');
";
    let applied = run_script(db.conn(), &script("1.0.0/widgets.sql", sql)).unwrap();
    assert_eq!(applied, 3);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM widgets"), 2);
}

#[test]
fn run_script_stops_at_first_failure() {
    let db = LiveDb::open_memory().unwrap();
    let sql = "CREATE TABLE ok (id INTEGER);\nCREATE BOGUS nonsense;\nCREATE TABLE never (id INTEGER);";
    let err = run_script(db.conn(), &script("1.0.0/broken.sql", sql)).unwrap_err();
    match err {
        crate::DbError::Execution { statement, .. } => {
            assert_eq!(statement, "CREATE BOGUS nonsense;");
        }
        other => panic!("unexpected error: {other}"),
    }
    // The first unit ran, the third never did.
    assert_eq!(count(&db, "SELECT COUNT(*) FROM ok"), 0);
    assert!(db.conn().prepare("SELECT * FROM never").is_err());
}

#[test]
fn run_script_skips_residue() {
    let db = LiveDb::open_memory().unwrap();
    let sql = "CREATE TABLE kept (id INTEGER);\nCREATE TABLE dropped (id INTEGER)";
    let applied = run_script(db.conn(), &script("1.0.0/tail.sql", sql)).unwrap();
    assert_eq!(applied, 1);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM kept"), 0);
    assert!(db.conn().prepare("SELECT * FROM dropped").is_err());
}

#[test]
fn run_script_with_shared_line_statements() {
    let db = LiveDb::open_memory().unwrap();
    let sql = "CREATE TABLE t (id INTEGER); INSERT INTO t VALUES (7);\n";
    let applied = run_script(db.conn(), &script("1.0.0/combo.sql", sql)).unwrap();
    assert_eq!(applied, 1);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM t"), 1);
}
