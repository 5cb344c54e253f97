//! The application's generic key/value configuration store.
//!
//! The migration subsystem only needs `get` and `put`; the rest of the
//! application uses the same store for its own settings.

use crate::error::{MigrateError, MigrateResult};
use async_trait::async_trait;
use sm_core::SettingsTable;
use sm_db::Database;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key/value settings collaborator.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Value stored under `key`, or `None` when it has never been written.
    async fn get(&self, key: &str) -> MigrateResult<Option<String>>;

    /// Replace the whole value stored under `key`.
    async fn put(&self, key: &str, value: &str) -> MigrateResult<()>;
}

/// Settings kept in a table of the application database.
pub struct DatabaseSettings<'a> {
    db: &'a dyn Database,
    table: SettingsTable,
}

impl<'a> DatabaseSettings<'a> {
    pub fn new(db: &'a dyn Database, table: SettingsTable) -> Self {
        Self { db, table }
    }
}

#[async_trait]
impl SettingsStore for DatabaseSettings<'_> {
    async fn get(&self, key: &str) -> MigrateResult<Option<String>> {
        self.db
            .read_setting(&self.table, key)
            .await
            .map_err(|e| MigrateError::SettingsRead {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    async fn put(&self, key: &str, value: &str) -> MigrateResult<()> {
        self.db
            .write_setting(&self.table, key, value)
            .await
            .map_err(|e| MigrateError::SettingsWrite {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}

/// In-process settings, for tests and hosts without a settings table.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.into(), value.into());
        }
        self
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get(&self, key: &str) -> MigrateResult<Option<String>> {
        let values = self.values.lock().map_err(|e| MigrateError::SettingsRead {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(values.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> MigrateResult<()> {
        let mut values = self.values.lock().map_err(|e| MigrateError::SettingsWrite {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
