//! upstep-core - Core library for upstep
//!
//! Shared types used across the upstep workspace: the [`SchemaVersion`]
//! value type with its total ordering, migration plan types and the plan
//! builder, and `upstep.yml` configuration parsing.

pub mod config;
pub mod error;
pub mod plan;
pub mod version;

pub use config::{BackupConfig, Config, DatabaseConfig, ScriptSourceKind, ScriptsConfig};
pub use error::{ConfigError, ConfigResult};
pub use plan::{build_plan, MigrationBucket, MigrationPlan, MigrationScript};
pub use version::{SchemaVersion, VersionError};
