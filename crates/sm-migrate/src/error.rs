//! Error types for sm-migrate

use sm_core::CoreError;
use sm_db::DbError;
use thiserror::Error;

/// Errors from the settings collaborator and manifest store.
///
/// These never cross [`crate::MigrationExecutor::try_migrate`]; the executor
/// classifies them into a [`crate::MigrationStatus`].
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Settings store read failed (M001)
    #[error("[M001] Settings read failed for '{key}': {message}")]
    SettingsRead { key: String, message: String },

    /// Settings store write failed (M002)
    #[error("[M002] Settings write failed for '{key}': {message}")]
    SettingsWrite { key: String, message: String },

    /// Stored manifest could not be decoded or encoded (M003)
    #[error("[M003] {0}")]
    Manifest(#[from] CoreError),

    /// Backend error with preserved source chain (M004)
    #[error("[M004] {0}")]
    Db(#[from] DbError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
