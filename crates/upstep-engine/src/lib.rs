//! upstep-engine - Migration orchestration for upstep
//!
//! Ties the workspace together: discover scripts from a [`ScriptSource`],
//! decide the startup path from the persisted schema version, take backups
//! through `upstep-backup`, and drive migration buckets through `upstep-db`.

pub mod error;
pub mod extractor;
pub mod orchestrator;
pub mod source;

pub use error::{EngineError, EngineResult, ExtractionError};
pub use extractor::extract_plan;
pub use orchestrator::{Engine, StartupPath, UpgradeReport};
pub use source::{DirSource, EmbeddedSource, ScriptSource};
