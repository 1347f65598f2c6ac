//! Backup command implementation - operator-forced backups and listing

use anyhow::Result;
use upstep_backup::BackupKind;

use crate::cli::{BackupArgs, GlobalArgs};
use crate::commands::common::{build_engine, load_config, project_root};

/// Execute the backup command
pub(crate) fn execute(args: &BackupArgs, global: &GlobalArgs) -> Result<()> {
    let root = project_root(global);
    let config = load_config(global)?;
    let mut engine = build_engine(&config, &root)?;

    if args.list {
        return list_backups(&engine);
    }

    let name = engine.force_backup()?;
    println!("✓ Backup created: {name}");
    Ok(())
}

fn list_backups(engine: &upstep_engine::Engine) -> Result<()> {
    let mut total = 0;
    for kind in [BackupKind::Routine, BackupKind::PreMigration] {
        let entries = engine.backups().entries(kind)?;
        total += entries.len();
        for entry in entries {
            println!(
                "  {}  {}  ({kind})",
                entry.created.format("%Y-%m-%d %H:%M:%S"),
                entry.name
            );
        }
    }
    if total == 0 {
        println!("No backups yet.");
    }
    Ok(())
}

#[cfg(test)]
#[path = "backup_test.rs"]
mod tests;
