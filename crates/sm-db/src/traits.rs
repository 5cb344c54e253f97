//! Database trait definition

use crate::error::{DbError, DbResult};
use async_trait::async_trait;
use sm_core::config::{is_safe_identifier, SettingsTable};

/// Database abstraction the migration executor talks to.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one batch exactly as given
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute one batch in its own transaction where the engine can roll
    /// back DDL. Engines without transactional DDL run it as a plain batch.
    async fn execute_batch_in_transaction(&self, sql: &str) -> DbResult<()> {
        self.execute_batch(sql).await
    }

    /// Read a value from the key/value settings table.
    /// Returns `None` when the key (or the table) does not exist yet.
    /// Reading never creates the table.
    async fn read_setting(&self, table: &SettingsTable, key: &str) -> DbResult<Option<String>>;

    /// Insert or replace a value in the key/value settings table,
    /// creating the table if it is missing.
    async fn write_setting(&self, table: &SettingsTable, key: &str, value: &str) -> DbResult<()>;

    /// Backend identifier, used for dialect dispatch and logging
    fn db_type(&self) -> &'static str;
}

/// Reject settings table names that could not be spliced into SQL safely.
pub(crate) fn check_identifiers(table: &SettingsTable) -> DbResult<()> {
    for name in [&table.table, &table.key_column, &table.value_column] {
        if !is_safe_identifier(name) {
            return Err(DbError::InvalidIdentifier(name.clone()));
        }
    }
    Ok(())
}
