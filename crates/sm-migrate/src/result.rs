//! Outcome of a migration attempt.

use serde::Serialize;
use std::fmt;

/// Terminal status of one [`crate::MigrationExecutor::try_migrate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MigrationStatus {
    /// Schema already matches, or auto migration is disabled.
    NotRequired,
    /// Every batch ran and the manifest now records the new version.
    Success,
    /// The backend has no schema scripts.
    UnsupportedProvider,
    /// A version string could not be parsed.
    VersionParsingError,
    /// The application is older than the installed schema.
    UnsupportedVersion,
    /// No script exists for the dialect and target version.
    ScriptMissing,
    /// A batch failed, or the manifest could not be written afterwards.
    ExecutionFailed,
}

impl MigrationStatus {
    /// Statuses that leave the schema untouched without being an error.
    pub fn is_skipped(self) -> bool {
        matches!(
            self,
            MigrationStatus::NotRequired
                | MigrationStatus::UnsupportedProvider
                | MigrationStatus::ScriptMissing
        )
    }

    /// Statuses a host would usually treat as fatal at startup.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            MigrationStatus::VersionParsingError
                | MigrationStatus::UnsupportedVersion
                | MigrationStatus::ExecutionFailed
        )
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MigrationStatus::NotRequired => "NotRequired",
            MigrationStatus::Success => "Success",
            MigrationStatus::UnsupportedProvider => "UnsupportedProvider",
            MigrationStatus::VersionParsingError => "VersionParsingError",
            MigrationStatus::UnsupportedVersion => "UnsupportedVersion",
            MigrationStatus::ScriptMissing => "ScriptMissing",
            MigrationStatus::ExecutionFailed => "ExecutionFailed",
        };
        f.write_str(s)
    }
}

/// Value returned to the host.
///
/// `status == Success` exactly when the manifest was updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationResult {
    pub status: MigrationStatus,
    pub message: String,
    /// Version written to the manifest; only set on success.
    pub applied_version: Option<String>,
    /// Script that was resolved, if resolution was reached.
    pub script_name: Option<String>,
    /// SHA-256 of that script.
    pub checksum: Option<String>,
    /// Batches that ran to completion before the call returned.
    pub batches_executed: usize,
}

impl MigrationResult {
    pub fn new(status: MigrationStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            applied_version: None,
            script_name: None,
            checksum: None,
            batches_executed: 0,
        }
    }

    pub(crate) fn with_script(mut self, name: &str, checksum: &str) -> Self {
        self.script_name = Some(name.to_string());
        self.checksum = Some(checksum.to_string());
        self
    }

    pub(crate) fn with_batches(mut self, executed: usize) -> Self {
        self.batches_executed = executed;
        self
    }

    pub(crate) fn with_applied_version(mut self, version: &str) -> Self {
        self.applied_version = Some(version.to_string());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == MigrationStatus::Success
    }
}

impl fmt::Display for MigrationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}
