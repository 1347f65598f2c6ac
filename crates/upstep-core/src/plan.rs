//! Migration plan types and the plan builder.

use crate::version::SchemaVersion;
use std::collections::BTreeMap;

/// One executable unit of schema change.
#[derive(Debug, Clone)]
pub struct MigrationScript {
    /// Version extracted from the script's path.
    pub version: SchemaVersion,
    /// Source-relative path; doubles as the stable sort key within a bucket.
    pub name: String,
    /// Full script text.
    pub sql: String,
}

/// All scripts introducing one schema version.
///
/// Scripts are ordered by name; the sort is stable, so equal names keep
/// their discovery order.
#[derive(Debug, Clone)]
pub struct MigrationBucket {
    pub version: SchemaVersion,
    pub scripts: Vec<MigrationScript>,
}

/// The ordered set of buckets a migration run will apply, ascending by
/// version and restricted to `current < v <= target`.
#[derive(Debug, Clone, Default)]
pub struct MigrationPlan {
    buckets: Vec<MigrationBucket>,
}

impl MigrationPlan {
    pub fn buckets(&self) -> &[MigrationBucket] {
        &self.buckets
    }

    pub fn into_buckets(self) -> Vec<MigrationBucket> {
        self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn script_count(&self) -> usize {
        self.buckets.iter().map(|b| b.scripts.len()).sum()
    }

    /// Version the database holds once every bucket is applied.
    pub fn final_version(&self) -> Option<SchemaVersion> {
        self.buckets.last().map(|b| b.version)
    }
}

/// Group `scripts` into an ordered plan covering `current < v <= target`.
///
/// Scripts outside the range are dropped. Empty buckets cannot arise: a
/// bucket exists only because at least one script mapped to its version.
pub fn build_plan(
    scripts: Vec<MigrationScript>,
    current: SchemaVersion,
    target: SchemaVersion,
) -> MigrationPlan {
    let mut by_version: BTreeMap<SchemaVersion, Vec<MigrationScript>> = BTreeMap::new();
    for script in scripts {
        if script.version > current && script.version <= target {
            by_version.entry(script.version).or_default().push(script);
        }
    }
    let buckets = by_version
        .into_iter()
        .map(|(version, mut scripts)| {
            scripts.sort_by(|a, b| a.name.cmp(&b.name));
            MigrationBucket { version, scripts }
        })
        .collect();
    MigrationPlan { buckets }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
