//! sm-core - Core library for schema-migrate
//!
//! This crate provides the pure building blocks of the schema migration
//! manager: semantic version comparison, the supported SQL dialects, the
//! embedded per-dialect schema scripts, `GO` batch splitting, script
//! checksums, the persisted system manifest, and configuration parsing.

pub mod batch;
pub mod checksum;
pub mod config;
pub mod dialect;
pub mod error;
pub mod manifest;
pub mod script;
pub mod version;

pub use batch::split_batches;
pub use checksum::compute_checksum;
pub use config::{Config, DatabaseConfig, ProviderKind, SettingsTable, SetupConfig};
pub use dialect::Dialect;
pub use error::{CoreError, CoreResult};
pub use manifest::{SystemManifest, MANIFEST_KEY};
pub use script::{EmbeddedScripts, MemoryScripts, MigrationScript, ScriptRepository, ScriptSource};
pub use version::{needs_migration, MigrationDecision, SchemaVersion};
