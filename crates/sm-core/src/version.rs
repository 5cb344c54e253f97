//! Semantic version parsing and the "does the schema need migrating" decision.
//!
//! Only the `(major, minor)` pair is schema-bearing. Patch releases never
//! change the schema, so two versions that differ only in patch are
//! considered compatible.

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// A strict `major.minor.patch` version.
///
/// Pre-release and build suffixes (`1.0.0-rc1`, `1.0.0+build`) are rejected
/// rather than guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SchemaVersion {
    /// The version recorded when no manifest has ever been written.
    pub const UNSET: SchemaVersion = SchemaVersion::new(0, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The `(major, minor)` pair that determines schema shape.
    pub fn schema_key(&self) -> (u64, u64) {
        (self.major, self.minor)
    }

    /// True when both versions share the same schema shape.
    pub fn is_schema_compatible(&self, other: &SchemaVersion) -> bool {
        self.schema_key() == other.schema_key()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SchemaVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| CoreError::VersionParse {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(fail("version is empty"));
        }

        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(fail("expected exactly three components (major.minor.patch)"));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            // u64::from_str accepts a leading '+', so check the digits ourselves
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(fail(&format!("component '{part}' is not a number")));
            }
            *slot = part
                .parse()
                .map_err(|_| fail(&format!("component '{part}' is out of range")))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

/// Outcome of comparing the installed schema version with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationDecision {
    /// Major or minor differ between installed and current.
    pub required: bool,
    /// Current is older than installed by `(major, minor)`.
    pub is_downgrade: bool,
    pub installed: SchemaVersion,
    pub current: SchemaVersion,
}

/// Decide whether the schema installed at `installed` must be migrated for
/// an application running `current`.
///
/// Malformed input on either side is an error; callers must not touch the
/// schema in that case.
pub fn needs_migration(installed: &str, current: &str) -> CoreResult<MigrationDecision> {
    let installed: SchemaVersion = installed.parse()?;
    let current: SchemaVersion = current.parse()?;

    let required = !installed.is_schema_compatible(&current);
    let is_downgrade = current.schema_key() < installed.schema_key();

    Ok(MigrationDecision {
        required,
        is_downgrade,
        installed,
        current,
    })
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
