//! Script discovery: namespace to ordered migration plan.

use crate::error::ExtractionError;
use crate::source::ScriptSource;
use upstep_core::{build_plan, MigrationPlan, MigrationScript, SchemaVersion};

/// Build the migration plan covering `current < v <= target` from `source`.
///
/// The first version-shaped substring in a path names the script's version.
/// Paths without one are skipped: the namespace may legitimately hold
/// non-versioned assets, so this is not an error. Only scripts inside the
/// range get read.
pub fn extract_plan(
    source: &dyn ScriptSource,
    current: SchemaVersion,
    target: SchemaVersion,
) -> Result<MigrationPlan, ExtractionError> {
    let mut scripts = Vec::new();
    for path in source.list()? {
        let Some(version) = SchemaVersion::find_in(&path) else {
            log::debug!("{} source: no version in '{path}', skipping", source.kind());
            continue;
        };
        if version <= current || version > target {
            continue;
        }
        let sql = source.read(&path)?;
        scripts.push(MigrationScript {
            version,
            name: path,
            sql,
        });
    }
    Ok(build_plan(scripts, current, target))
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
