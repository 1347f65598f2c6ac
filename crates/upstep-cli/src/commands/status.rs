//! Status command implementation - reports version state and pending work

use anyhow::Result;
use serde::Serialize;
use upstep_backup::BackupKind;

use crate::cli::{GlobalArgs, StatusArgs, StatusFormat};
use crate::commands::common::{build_engine, load_config, project_root};

/// Payload for `status --format json`
#[derive(Debug, Serialize)]
struct StatusReport {
    name: String,
    current_version: Option<String>,
    target_version: String,
    pending_buckets: usize,
    pending_scripts: usize,
    last_routine_backup: Option<String>,
    last_premigration_backup: Option<String>,
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let root = project_root(global);
    let config = load_config(global)?;
    let engine = build_engine(&config, &root)?;

    let current = engine.current_version()?;
    let plan = engine.pending_plan()?;
    let last_routine = engine
        .backups()
        .entries(BackupKind::Routine)?
        .pop()
        .map(|e| e.name);
    let last_premigration = engine
        .backups()
        .entries(BackupKind::PreMigration)?
        .pop()
        .map(|e| e.name);

    let report = StatusReport {
        name: config.name.clone(),
        current_version: current.map(|v| v.to_string()),
        target_version: engine.target().to_string(),
        pending_buckets: plan.bucket_count(),
        pending_scripts: plan.script_count(),
        last_routine_backup: last_routine,
        last_premigration_backup: last_premigration,
    };

    match args.format {
        StatusFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        StatusFormat::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &StatusReport) {
    println!("{}", report.name);
    match &report.current_version {
        Some(v) => println!("  current version:  {v}"),
        None => println!("  current version:  (no database yet)"),
    }
    println!("  target version:   {}", report.target_version);
    println!(
        "  pending:          {} script(s) in {} bucket(s)",
        report.pending_scripts, report.pending_buckets
    );
    println!(
        "  routine backup:   {}",
        report.last_routine_backup.as_deref().unwrap_or("(none)")
    );
    println!(
        "  pre-mig. backup:  {}",
        report
            .last_premigration_backup
            .as_deref()
            .unwrap_or("(none)")
    );
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
