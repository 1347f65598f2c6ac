//! Migration script execution.
//!
//! Scripts are free-form SQL text: `--` line comments, statements spanning
//! several lines, several statements per script. The splitter reduces a
//! script to executable units without parsing SQL; the database stays the
//! sole authority on syntax.

use crate::error::{DbError, DbResult};
use duckdb::Connection;
use std::io::BufRead;
use upstep_core::MigrationScript;

/// Line comment delimiter recognized in migration scripts.
const COMMENT: &str = "--";

/// Statement delimiter.
const DELIMITER: char = ';';

/// Outcome of splitting a script: executable units plus any trailing content
/// that never saw a closing `;`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitScript {
    /// Whitespace-normalized units, each ending with `;`.
    pub units: Vec<String>,
    /// Leftover content at end of stream, normalized. Never executed.
    pub residue: Option<String>,
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a script stream into executable units.
///
/// Per line: strip everything from the first `--` to end of line, then append
/// the survivor to a pending buffer with a single space between lines.
/// Whenever the normalized buffer ends with `;` it becomes one unit and the
/// buffer resets. A unit may contain several `;`-separated statements when
/// they share a line; the database executes them as a batch.
pub fn split_statements<R: BufRead>(reader: R) -> std::io::Result<SplitScript> {
    let mut split = SplitScript::default();
    let mut pending = String::new();

    for line in reader.lines() {
        let line = line?;
        let content = match line.find(COMMENT) {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };
        if !pending.is_empty() {
            pending.push(' ');
        }
        pending.push_str(content);

        let normalized = normalize_ws(&pending);
        if normalized.ends_with(DELIMITER) {
            split.units.push(normalized);
            pending.clear();
        }
    }

    let leftover = normalize_ws(&pending);
    if !leftover.is_empty() {
        split.residue = Some(leftover);
    }
    Ok(split)
}

/// Execute every unit of `script` on `conn`, in order. Returns the number of
/// units executed.
///
/// Stops at the first failing unit; the error carries the unit text so the
/// operator can find it in the script. Trailing content without a closing
/// `;` is logged and skipped.
pub fn run_script(conn: &Connection, script: &MigrationScript) -> DbResult<usize> {
    let split = split_statements(script.sql.as_bytes()).map_err(|e| DbError::ScriptRead {
        name: script.name.clone(),
        source: e,
    })?;

    if let Some(residue) = &split.residue {
        log::warn!(
            "script {}: trailing content without ';' was not executed: `{residue}`",
            script.name
        );
    }

    for unit in &split.units {
        log::debug!("script {}: executing `{unit}`", script.name);
        conn.execute_batch(unit).map_err(|e| DbError::Execution {
            statement: unit.clone(),
            source: e,
        })?;
    }
    Ok(split.units.len())
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
