//! Schema version value type and its total ordering.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised for strings that do not denote a schema version.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    /// The string does not match `MAJOR.MINOR[.PATCH[.REV]]`
    #[error("invalid schema version '{0}': expected MAJOR.MINOR[.PATCH[.REV]]")]
    InvalidFormat(String),

    /// A component does not fit in 32 bits
    #[error("schema version component out of range in '{0}'")]
    ComponentOutOfRange(String),
}

/// Version pattern: at least `major.minor`, up to two further numeric
/// components. Used unanchored for embedded search, anchored for parsing.
const VERSION_PATTERN: &str = r"(\d+)\.(\d+)(?:\.(\d+))?(?:\.(\d+))?";

fn embedded_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("valid regex literal"))
}

fn anchored_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^{VERSION_PATTERN}$")).expect("valid regex literal")
    })
}

/// A schema version: `major.minor.patch` plus an optional fourth numeric
/// component. Missing components are zero, so `1.2` and `1.2.0` are the
/// same version.
///
/// The derived `Ord` compares the four components lexicographically, which
/// gives the total order migrations are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub rev: u32,
}

impl SchemaVersion {
    /// The lowest version. A fresh database is implicitly at `ZERO`.
    pub const ZERO: SchemaVersion = SchemaVersion {
        major: 0,
        minor: 0,
        patch: 0,
        rev: 0,
    };

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            rev: 0,
        }
    }

    /// Parse a whole string (surrounding whitespace tolerated) as a version.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let trimmed = text.trim();
        let caps = anchored_regex()
            .captures(trimmed)
            .ok_or_else(|| VersionError::InvalidFormat(text.to_string()))?;
        Self::from_captures(&caps, text)
    }

    /// Find the first version embedded anywhere in `text` (typically a
    /// script path such as `migrations/1.2.0/add_index.sql`).
    ///
    /// Returns `None` when no version-shaped substring exists; the caller
    /// treats such resources as non-versioned and skips them.
    pub fn find_in(text: &str) -> Option<Self> {
        let caps = embedded_regex().captures(text)?;
        Self::from_captures(&caps, text).ok()
    }

    fn from_captures(caps: &regex::Captures<'_>, original: &str) -> Result<Self, VersionError> {
        let component = |index: usize| -> Result<u32, VersionError> {
            match caps.get(index) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| VersionError::ComponentOutOfRange(original.to_string())),
                None => Ok(0),
            }
        };
        Ok(Self {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            rev: component(4)?,
        })
    }
}

impl fmt::Display for SchemaVersion {
    /// Canonical form: three components, the fourth only when nonzero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.rev != 0 {
            write!(f, ".{}", self.rev)?;
        }
        Ok(())
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
