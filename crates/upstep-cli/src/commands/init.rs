//! Init command implementation - scaffolds a new upstep project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) fn execute(args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = Path::new(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new upstep project: {}\n", args.name);

    // Create directory structure
    let dirs = ["", "migrations", "migrations/1.0.0", "data", "backups"];
    for dir in &dirs {
        let path = project_dir.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    // Generate upstep.yml
    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{safe_name}"
target_version: "1.0.0"

database:
  dir: data
  file: app.duckdb

scripts:
  source: dir
  dir: migrations

backup:
  dir: backups
  routine_retention: 5
  premigration_retention: 3
  delay_days: 7
"#
    );
    fs::write(project_dir.join("upstep.yml"), config_content)
        .context("Failed to write upstep.yml")?;

    // Generate a starter migration script
    let baseline_sql = r#"-- Baseline schema for version 1.0.0.
-- Add more scripts under migrations/<version>/ and raise target_version
-- when the application needs a newer schema.
CREATE TABLE app_info (
    key   VARCHAR PRIMARY KEY,
    value VARCHAR NOT NULL
);

INSERT INTO app_info VALUES ('created_by', 'upstep init');
"#;
    fs::write(
        project_dir.join("migrations/1.0.0/baseline.sql"),
        baseline_sql,
    )
    .context("Failed to write starter migration script")?;

    // Keep the empty directories under version control
    fs::write(project_dir.join("data/.gitkeep"), "")
        .context("Failed to write data/.gitkeep")?;
    fs::write(project_dir.join("backups/.gitkeep"), "")
        .context("Failed to write backups/.gitkeep")?;

    println!("Created project structure:");
    println!("  {}/", args.name);
    println!("  ├── upstep.yml");
    println!("  ├── migrations/");
    println!("  │   └── 1.0.0/");
    println!("  │       └── baseline.sql");
    println!("  ├── data/");
    println!("  └── backups/");
    println!();
    println!("Next steps:");
    println!("  cd {}", args.name);
    println!("  upstep up        # create the database at 1.0.0");
    println!("  upstep status    # check where you stand");

    Ok(())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
