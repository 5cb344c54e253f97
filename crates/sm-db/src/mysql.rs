//! MySQL backend (sqlx)
//!
//! MySQL commits DDL implicitly, so batches always run outside a
//! transaction.

use crate::error::{DbError, DbResult};
use crate::traits::{check_identifiers, Database};
use async_trait::async_trait;
use sm_core::config::SettingsTable;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// MySQL database backend
pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    /// Connect with a `mysql://` URL.
    pub async fn connect(url: &str) -> DbResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn ensure_settings_table(&self, table: &SettingsTable) -> DbResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS `{t}` (`{k}` VARCHAR(64) NOT NULL PRIMARY KEY, `{v}` LONGTEXT NULL)",
            t = table.table,
            k = table.key_column,
            v = table.value_column,
        );
        sqlx::raw_sql(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn table_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.TABLES \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl Database for MySqlBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn read_setting(&self, table: &SettingsTable, key: &str) -> DbResult<Option<String>> {
        check_identifiers(table)?;
        if !self.table_exists(&table.table).await? {
            return Ok(None);
        }

        let sql = format!(
            "SELECT `{v}` FROM `{t}` WHERE `{k}` = ?",
            t = table.table,
            k = table.key_column,
            v = table.value_column,
        );
        let value: Option<Option<String>> = sqlx::query_scalar(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value.flatten())
    }

    async fn write_setting(&self, table: &SettingsTable, key: &str, value: &str) -> DbResult<()> {
        check_identifiers(table)?;
        self.ensure_settings_table(table).await?;

        let sql = format!(
            "INSERT INTO `{t}` (`{k}`, `{v}`) VALUES (?, ?) \
             ON DUPLICATE KEY UPDATE `{v}` = VALUES(`{v}`)",
            t = table.table,
            k = table.key_column,
            v = table.value_column,
        );
        sqlx::query(&sql)
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }
}
