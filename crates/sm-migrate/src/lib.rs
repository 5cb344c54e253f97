//! sm-migrate - Startup schema migration for schema-migrate
//!
//! A host calls [`MigrationExecutor::try_migrate`] once at startup. The
//! executor compares the installed schema version recorded in the system
//! manifest with the application version, picks the script for the active
//! dialect, runs its batches in order, and records the new version only
//! after every batch succeeded.

pub mod dispatch;
pub mod error;
pub mod executor;
pub mod manifest_store;
pub mod result;
pub mod settings;

pub use dispatch::{detect_dialect, UnsupportedProvider};
pub use error::{MigrateError, MigrateResult};
pub use executor::{is_schema_current, MigrationExecutor};
pub use manifest_store::ManifestStore;
pub use result::{MigrationResult, MigrationStatus};
pub use settings::{DatabaseSettings, MemorySettings, SettingsStore};
