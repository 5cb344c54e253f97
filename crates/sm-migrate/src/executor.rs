//! The startup migration state machine.
//!
//! ```text
//! Idle -> CheckingVersion -> ResolvingScript -> Executing -> Updating -> Done
//!              |                   |                |            |
//!              +-> Skipped / Failed (no schema change before Executing)
//! ```
//!
//! Each call runs the sequence once, to completion, before returning.
//! Batches run one at a time in source order and execution stops at the
//! first failing batch. Batches that already ran stay applied; nothing is
//! retried.

use crate::dispatch::detect_dialect;
use crate::error::MigrateError;
use crate::manifest_store::ManifestStore;
use crate::result::{MigrationResult, MigrationStatus};
use crate::settings::SettingsStore;
use chrono::Utc;
use sm_core::{
    needs_migration, split_batches, Dialect, MigrationScript, ScriptRepository, SchemaVersion,
    SystemManifest,
};
use sm_db::{Database, DbError};
use std::fmt;

/// Phase the executor is in, used in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    CheckingVersion,
    ResolvingScript,
    Executing,
    Updating,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::CheckingVersion => "checking version",
            Phase::ResolvingScript => "resolving script",
            Phase::Executing => "executing",
            Phase::Updating => "updating manifest",
        };
        f.write_str(s)
    }
}

/// Brings the schema up to the application's major/minor version.
pub struct MigrationExecutor<S> {
    auto_database_migration: bool,
    scripts: ScriptRepository,
    manifest: ManifestStore<S>,
}

impl<S: SettingsStore> MigrationExecutor<S> {
    /// `auto_database_migration` is the `Setup:AutoDatabaseMigration` gate.
    pub fn new(
        auto_database_migration: bool,
        scripts: ScriptRepository,
        manifest: ManifestStore<S>,
    ) -> Self {
        Self {
            auto_database_migration,
            scripts,
            manifest,
        }
    }

    pub fn manifest_store(&self) -> &ManifestStore<S> {
        &self.manifest
    }

    pub fn scripts(&self) -> &ScriptRepository {
        &self.scripts
    }

    /// Read the installed manifest and migrate `db` to `current_version`.
    ///
    /// Never returns an error; every outcome is a [`MigrationStatus`].
    pub async fn try_migrate(&self, db: &dyn Database, current_version: &str) -> MigrationResult {
        if let Some(disabled) = self.disabled() {
            return disabled;
        }

        let installed = match self.manifest.read().await {
            Ok(manifest) => manifest,
            Err(MigrateError::Manifest(e)) => {
                log::error!(
                    "Stored system manifest is unreadable ({e}); refusing to migrate to {current_version}"
                );
                return MigrationResult::new(
                    MigrationStatus::VersionParsingError,
                    format!("stored system manifest is unreadable: {e}"),
                );
            }
            Err(e) => {
                log::error!("Failed to read system manifest from {}: {e}", db.db_type());
                return MigrationResult::new(
                    MigrationStatus::ExecutionFailed,
                    format!("failed to read system manifest: {e}"),
                );
            }
        };

        self.run(db, &installed, current_version).await
    }

    /// Migrate `db` from an explicitly supplied installed manifest.
    ///
    /// Same as [`try_migrate`](Self::try_migrate) without the manifest read.
    pub async fn migrate_from(
        &self,
        db: &dyn Database,
        installed: &SystemManifest,
        current_version: &str,
    ) -> MigrationResult {
        if let Some(disabled) = self.disabled() {
            return disabled;
        }
        self.run(db, installed, current_version).await
    }

    fn disabled(&self) -> Option<MigrationResult> {
        if self.auto_database_migration {
            return None;
        }
        log::info!("Automatic database migration is disabled, skipping");
        Some(MigrationResult::new(
            MigrationStatus::NotRequired,
            "automatic database migration is disabled",
        ))
    }

    async fn run(
        &self,
        db: &dyn Database,
        installed: &SystemManifest,
        current_version: &str,
    ) -> MigrationResult {
        let installed_version = installed.version_string.as_str();

        log::debug!("Migration phase: {}", Phase::CheckingVersion);
        let decision = match needs_migration(installed_version, current_version) {
            Ok(decision) => decision,
            Err(e) => {
                log::error!(
                    "Cannot compare schema versions (installed '{installed_version}', current '{current_version}', provider {}): {e}",
                    db.db_type()
                );
                return MigrationResult::new(MigrationStatus::VersionParsingError, e.to_string());
            }
        };

        if !decision.required {
            log::info!(
                "Schema version {installed_version} is compatible with {current_version}, no migration required"
            );
            return MigrationResult::new(
                MigrationStatus::NotRequired,
                format!("schema {installed_version} is compatible with {current_version}"),
            );
        }

        if decision.is_downgrade {
            log::error!(
                "Application version {current_version} is older than installed schema {installed_version}; downgrades are not supported"
            );
            return MigrationResult::new(
                MigrationStatus::UnsupportedVersion,
                format!(
                    "cannot downgrade schema from {installed_version} to {current_version}"
                ),
            );
        }

        log::debug!("Migration phase: {}", Phase::ResolvingScript);
        let dialect = match detect_dialect(db) {
            Ok(dialect) => dialect,
            Err(e) => {
                log::warn!(
                    "Schema migration {installed_version} -> {current_version} skipped: {e}"
                );
                return MigrationResult::new(MigrationStatus::UnsupportedProvider, e.to_string());
            }
        };

        let script = match self.scripts.resolve(dialect, &decision.current) {
            Some(script) => script,
            None => {
                let name = self
                    .scripts
                    .script_name_for(dialect, &decision.current)
                    .unwrap_or_else(|| format!("<no revision for {}>", decision.current));
                log::warn!(
                    "Schema migration {installed_version} -> {current_version} skipped: no {dialect} script ({name})"
                );
                return MigrationResult::new(
                    MigrationStatus::ScriptMissing,
                    format!("no {dialect} schema script for {current_version} ({name})"),
                );
            }
        };

        let checksum = script.checksum();
        log::info!(
            "Migrating {dialect} schema {installed_version} -> {current_version} with {} (sha256 {checksum})",
            script.name
        );

        log::debug!("Migration phase: {}", Phase::Executing);
        let executed = match execute_script(db, dialect, &script).await {
            Ok(executed) => executed,
            Err(failure) => {
                log::error!(
                    "Schema migration {installed_version} -> {current_version} on {dialect} failed at batch {} of {} in {}: {}; {} earlier batch(es) remain applied",
                    failure.batch,
                    failure.total,
                    script.name,
                    failure.message,
                    failure.batch - 1
                );
                return MigrationResult::new(
                    MigrationStatus::ExecutionFailed,
                    failure.message.clone(),
                )
                .with_script(&script.name, &checksum)
                .with_batches(failure.batch - 1);
            }
        };

        log::debug!("Migration phase: {}", Phase::Updating);
        let current = decision.current.to_string();
        let manifest = SystemManifest::new(current.clone(), Utc::now()).with_checksum(&checksum);
        if let Err(e) = self.manifest.write(&manifest).await {
            let json = manifest.to_json().unwrap_or_default();
            log::error!(
                "Schema was migrated to {current} on {dialect} but the system manifest could not be written: {e}. \
                 Record it manually as {json}"
            );
            return MigrationResult::new(
                MigrationStatus::ExecutionFailed,
                format!("schema migrated to {current} but manifest update failed: {e}"),
            )
            .with_script(&script.name, &checksum)
            .with_batches(executed);
        }

        log::info!(
            "Schema migrated to {current} on {dialect}: {executed} batch(es) from {}",
            script.name
        );
        MigrationResult::new(
            MigrationStatus::Success,
            format!("schema migrated from {installed_version} to {current}"),
        )
        .with_script(&script.name, &checksum)
        .with_batches(executed)
        .with_applied_version(&current)
    }
}

/// Where and why batch execution stopped.
struct BatchFailure {
    /// 1-based index of the failing batch.
    batch: usize,
    total: usize,
    /// Engine message, unmodified.
    message: String,
}

/// Run every batch of `script` in order, stopping at the first error.
async fn execute_script(
    db: &dyn Database,
    dialect: Dialect,
    script: &MigrationScript,
) -> Result<usize, BatchFailure> {
    let batches = split_batches(&script.raw_content);
    let total = batches.len();

    for (idx, batch) in batches.iter().enumerate() {
        log::debug!("Executing batch {} of {total} from {}", idx + 1, script.name);

        let outcome = if dialect.supports_transactional_ddl() {
            db.execute_batch_in_transaction(batch).await
        } else {
            db.execute_batch(batch).await
        };

        if let Err(e) = outcome {
            return Err(BatchFailure {
                batch: idx + 1,
                total,
                message: engine_message(e),
            });
        }
    }
    Ok(total)
}

fn engine_message(err: DbError) -> String {
    match err {
        DbError::ExecutionError(msg) => msg,
        other => other.to_string(),
    }
}

/// True when `current` parses and shares major/minor with `installed`.
///
/// Convenience for hosts that only want to warn about a stale schema.
pub fn is_schema_current(installed: &SystemManifest, current: &str) -> bool {
    match (
        installed.version_string.parse::<SchemaVersion>(),
        current.parse::<SchemaVersion>(),
    ) {
        (Ok(installed), Ok(current)) => installed.is_schema_compatible(&current),
        _ => false,
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
