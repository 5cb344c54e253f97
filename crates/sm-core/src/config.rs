//! Configuration types and parsing for schema-migration.yml

use crate::error::{CoreError, CoreResult};
use crate::version::SchemaVersion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default config file names looked up by [`Config::load_from_dir`].
pub const CONFIG_FILE_NAMES: [&str; 2] = ["schema-migration.yml", "schema-migration.yaml"];

/// Main configuration from schema-migration.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Application version the schema should be brought up to.
    /// The CLI flag takes precedence when both are given.
    #[serde(default)]
    pub app_version: Option<String>,

    /// Startup behaviour
    #[serde(default)]
    pub setup: SetupConfig,

    /// Database connection configuration
    pub database: DatabaseConfig,

    /// Key/value configuration table holding the system manifest
    #[serde(default)]
    pub settings: SettingsTable,
}

/// The `Setup` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupConfig {
    /// Gate for the whole migration subsystem (`Setup:AutoDatabaseMigration`).
    /// When false every migration attempt is a no-op.
    #[serde(default)]
    pub auto_database_migration: bool,
}

/// Backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    SqlServer,
    MySql,
    PostgreSql,
    /// In-process DuckDB. Has no schema scripts; useful for local runs.
    DuckDb,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::SqlServer => write!(f, "sqlserver"),
            ProviderKind::MySql => write!(f, "mysql"),
            ProviderKind::PostgreSql => write!(f, "postgresql"),
            ProviderKind::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub provider: ProviderKind,

    /// ADO string for SQL Server, URL for MySQL/PostgreSQL, path or
    /// `:memory:` for DuckDB.
    pub connection_string: String,
}

/// Location of the key/value configuration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsTable {
    #[serde(default = "default_settings_table")]
    pub table: String,

    #[serde(default = "default_key_column")]
    pub key_column: String,

    #[serde(default = "default_value_column")]
    pub value_column: String,
}

impl Default for SettingsTable {
    fn default() -> Self {
        Self {
            table: default_settings_table(),
            key_column: default_key_column(),
            value_column: default_value_column(),
        }
    }
}

fn default_settings_table() -> String {
    "blog_configuration".to_string()
}

fn default_key_column() -> String {
    "cfg_key".to_string()
}

fn default_value_column() -> String {
    "cfg_value".to_string()
}

/// True for plain SQL identifiers: a letter or underscore followed by
/// letters, digits or underscores.
pub fn is_safe_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl SettingsTable {
    fn validate(&self) -> CoreResult<()> {
        for (what, name) in [
            ("settings.table", &self.table),
            ("settings.key_column", &self.key_column),
            ("settings.value_column", &self.value_column),
        ] {
            if !is_safe_identifier(name) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{what} '{name}' is not a plain SQL identifier"),
                });
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        log::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a directory containing schema-migration.yml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Self::load(&candidate);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.database.connection_string.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.connection_string cannot be empty".to_string(),
            });
        }

        if let Some(version) = &self.app_version {
            version
                .parse::<SchemaVersion>()
                .map_err(|e| CoreError::ConfigInvalid {
                    message: format!("app_version: {e}"),
                })?;
        }

        self.settings.validate()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
