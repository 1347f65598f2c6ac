//! Up command implementation - runs the startup state machine to completion

use anyhow::{Context, Result};
use upstep_engine::StartupPath;

use crate::cli::{GlobalArgs, UpArgs};
use crate::commands::common::{build_engine, load_config, project_root};

/// Execute the up command
pub(crate) fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let root = project_root(global);
    let mut config = load_config(global)?;
    if let Some(raw) = &args.target_version {
        config.target_version = raw
            .parse()
            .with_context(|| format!("Invalid --target-version '{raw}'"))?;
    }

    if global.verbose {
        eprintln!("[verbose] database: {}", config.database_path(&root).display());
        eprintln!("[verbose] script source: {}", config.scripts.source);
        eprintln!("[verbose] target version: {}", config.target_version);
    }

    let mut engine = build_engine(&config, &root)?;
    let report = engine.ensure_current()?;

    match report.path {
        StartupPath::UpToDate => {
            println!("✓ Schema already at {}", report.to);
        }
        StartupPath::Fresh => {
            println!(
                "✓ Initialized fresh database at {} ({} script(s) in {} bucket(s))",
                report.to, report.scripts_applied, report.buckets_applied
            );
        }
        StartupPath::Migrated => {
            println!(
                "✓ Migrated {} -> {} ({} script(s) in {} bucket(s))",
                report.from, report.to, report.scripts_applied, report.buckets_applied
            );
        }
    }
    if let Some(name) = &report.backup {
        println!("  backup created: {name}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "up_test.rs"]
mod tests;
