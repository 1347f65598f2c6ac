//! Plan command implementation - previews pending buckets without applying

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, PlanArgs};
use crate::commands::common::{build_engine, load_config, project_root};

/// Execute the plan command
pub(crate) fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let root = project_root(global);
    let mut config = load_config(global)?;
    if let Some(raw) = &args.target_version {
        config.target_version = raw
            .parse()
            .with_context(|| format!("Invalid --target-version '{raw}'"))?;
    }

    let engine = build_engine(&config, &root)?;
    let plan = engine.pending_plan()?;

    if plan.is_empty() {
        println!("Nothing to do: schema is up to date.");
        return Ok(());
    }

    println!(
        "{} script(s) in {} bucket(s) pending:\n",
        plan.script_count(),
        plan.bucket_count()
    );
    for bucket in plan.buckets() {
        println!("  {}", bucket.version);
        for script in &bucket.scripts {
            println!("    {}", script.name);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
