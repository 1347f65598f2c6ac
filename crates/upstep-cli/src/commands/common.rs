//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use upstep_backup::{BackupManager, BackupPolicy};
use upstep_core::{Config, ScriptSourceKind};
use upstep_engine::{DirSource, Engine, ScriptSource};

use crate::cli::GlobalArgs;

/// Migration scripts compiled into this binary, for deployments that run
/// without loose script files. See the `embedded-scripts` feature.
#[cfg(feature = "embedded-scripts")]
#[derive(rust_embed::RustEmbed)]
#[folder = "migrations/"]
struct EmbeddedScripts;

pub(crate) fn project_root(global: &GlobalArgs) -> PathBuf {
    PathBuf::from(&global.project_dir)
}

/// Load upstep.yml, honoring the `--config` override.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from '{path}'")),
        None => Config::load_from_dir(&project_root(global))
            .context("Failed to load project configuration"),
    }
}

fn script_source(config: &Config, root: &Path) -> Result<Box<dyn ScriptSource>> {
    match config.scripts.source {
        ScriptSourceKind::Dir => Ok(Box::new(DirSource::new(&config.scripts_dir(root)))),
        ScriptSourceKind::Embedded => embedded_source(),
    }
}

#[cfg(feature = "embedded-scripts")]
fn embedded_source() -> Result<Box<dyn ScriptSource>> {
    Ok(Box::new(
        upstep_engine::EmbeddedSource::<EmbeddedScripts>::new(),
    ))
}

#[cfg(not(feature = "embedded-scripts"))]
fn embedded_source() -> Result<Box<dyn ScriptSource>> {
    anyhow::bail!(
        "scripts.source is 'embedded', but this binary was built without the \
         'embedded-scripts' feature"
    )
}

/// Wire up the migration engine from a loaded configuration.
pub(crate) fn build_engine(config: &Config, root: &Path) -> Result<Engine> {
    let policy = BackupPolicy {
        routine_retention: config.backup.routine_retention,
        premigration_retention: config.backup.premigration_retention,
        delay_days: config.backup.delay_days,
    };
    let backups = BackupManager::open(&config.backup_dir(root), policy)
        .context("Failed to open backup directory")?;
    let source = script_source(config, root)?;
    Ok(Engine::new(
        config.database_path(root),
        config.target_version,
        source,
        backups,
    ))
}
