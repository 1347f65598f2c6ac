//! Configuration types and parsing for upstep.yml

use crate::error::{ConfigError, ConfigResult};
use crate::version::SchemaVersion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Main project configuration from upstep.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Application name, used in status output and reports
    pub name: String,

    /// Schema version this build of the application requires
    pub target_version: SchemaVersion,

    /// Live database location
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Where migration scripts come from
    #[serde(default)]
    pub scripts: ScriptsConfig,

    /// Backup directory and rotation policy
    #[serde(default)]
    pub backup: BackupConfig,
}

/// Live database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Storage directory, created at startup when absent
    #[serde(default = "default_database_dir")]
    pub dir: String,

    /// Database file name inside `dir`
    #[serde(default = "default_database_file")]
    pub file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dir: default_database_dir(),
            file: default_database_file(),
        }
    }
}

/// Which namespace migration scripts are discovered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScriptSourceKind {
    /// Loose `.sql` files under `scripts.dir`
    #[default]
    Dir,
    /// Scripts compiled into the host binary
    Embedded,
}

impl fmt::Display for ScriptSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptSourceKind::Dir => write!(f, "dir"),
            ScriptSourceKind::Embedded => write!(f, "embedded"),
        }
    }
}

/// Migration script discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptsConfig {
    #[serde(default)]
    pub source: ScriptSourceKind,

    /// Script directory, only consulted when `source` is `dir`
    #[serde(default = "default_scripts_dir")]
    pub dir: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            source: ScriptSourceKind::default(),
            dir: default_scripts_dir(),
        }
    }
}

/// Backup directory and rotation policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackupConfig {
    /// Directory backups are written to
    #[serde(default = "default_backup_dir")]
    pub dir: String,

    /// How many routine backups to keep
    #[serde(default = "default_routine_retention")]
    pub routine_retention: usize,

    /// How many pre-migration backups to keep
    #[serde(default = "default_premigration_retention")]
    pub premigration_retention: usize,

    /// A routine backup is due once the oldest one is older than this
    #[serde(default = "default_delay_days")]
    pub delay_days: i64,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dir: default_backup_dir(),
            routine_retention: default_routine_retention(),
            premigration_retention: default_premigration_retention(),
            delay_days: default_delay_days(),
        }
    }
}

fn default_database_dir() -> String {
    "data".to_string()
}

fn default_database_file() -> String {
    "app.duckdb".to_string()
}

fn default_scripts_dir() -> String {
    "migrations".to_string()
}

fn default_backup_dir() -> String {
    "backups".to_string()
}

fn default_routine_retention() -> usize {
    5
}

fn default_premigration_retention() -> usize {
    3
}

fn default_delay_days() -> i64 {
    7
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for upstep.yml or upstep.yaml
    pub fn load_from_dir(dir: &Path) -> ConfigResult<Self> {
        let yml_path = dir.join("upstep.yml");
        let yaml_path = dir.join("upstep.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(ConfigError::NotFound {
                path: dir.join("upstep.yml").display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()> {
        if self.name.is_empty() {
            return Err(ConfigError::Invalid {
                message: "Application name cannot be empty".to_string(),
            });
        }

        if self.database.file.is_empty() {
            return Err(ConfigError::Invalid {
                message: "database.file cannot be empty".to_string(),
            });
        }

        if self.scripts.source == ScriptSourceKind::Dir && self.scripts.dir.is_empty() {
            return Err(ConfigError::Invalid {
                message: "scripts.dir cannot be empty when scripts.source is 'dir'".to_string(),
            });
        }

        if self.backup.routine_retention == 0 {
            return Err(ConfigError::Invalid {
                message: "backup.routine_retention must be at least 1".to_string(),
            });
        }
        if self.backup.premigration_retention == 0 {
            return Err(ConfigError::Invalid {
                message: "backup.premigration_retention must be at least 1".to_string(),
            });
        }
        if self.backup.delay_days < 0 {
            return Err(ConfigError::Invalid {
                message: "backup.delay_days cannot be negative".to_string(),
            });
        }

        Ok(())
    }

    /// Absolute path of the live database file.
    ///
    /// `Path::join` replaces the base when the configured directory is
    /// already absolute, so both relative and absolute values work.
    pub fn database_path(&self, root: &Path) -> PathBuf {
        root.join(&self.database.dir).join(&self.database.file)
    }

    /// Absolute path of the database storage directory
    pub fn storage_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.database.dir)
    }

    /// Absolute path of the migration scripts directory
    pub fn scripts_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.scripts.dir)
    }

    /// Absolute path of the backup directory
    pub fn backup_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.backup.dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
