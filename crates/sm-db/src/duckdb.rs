//! DuckDB database backend implementation
//!
//! DuckDB has no schema scripts of its own. It backs local runs and tests:
//! the settings table works like on any other engine, while dialect
//! dispatch reports it as unsupported.

use crate::error::{DbError, DbResult};
use crate::traits::{check_identifiers, Database};
use async_trait::async_trait;
use duckdb::{Connection, OptionalExt};
use sm_core::config::SettingsTable;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Check if a table or view exists
    pub fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock()?;
        Self::relation_exists_on(&conn, name)
    }

    fn relation_exists_on(conn: &Connection, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = match name.rfind('.') {
            Some(pos) => (&name[..pos], &name[pos + 1..]),
            None => ("main", name),
        };

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            duckdb::params![schema, table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Count the rows a query returns
    pub fn query_count(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM ({sql})"), [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }

    fn ensure_settings_table(conn: &Connection, table: &SettingsTable) -> DbResult<()> {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {t} ({k} VARCHAR PRIMARY KEY, {v} VARCHAR)",
            t = table.table,
            k = table.key_column,
            v = table.value_column,
        ))?;
        Ok(())
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    async fn read_setting(&self, table: &SettingsTable, key: &str) -> DbResult<Option<String>> {
        check_identifiers(table)?;
        let conn = self.lock()?;
        if !Self::relation_exists_on(&conn, &table.table)? {
            return Ok(None);
        }

        let value: Option<Option<String>> = conn
            .query_row(
                &format!(
                    "SELECT {v} FROM {t} WHERE {k} = ?",
                    t = table.table,
                    k = table.key_column,
                    v = table.value_column,
                ),
                duckdb::params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.flatten())
    }

    async fn write_setting(&self, table: &SettingsTable, key: &str, value: &str) -> DbResult<()> {
        check_identifiers(table)?;
        let conn = self.lock()?;
        Self::ensure_settings_table(&conn, table)?;

        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {t} ({k}, {v}) VALUES (?, ?)",
                t = table.table,
                k = table.key_column,
                v = table.value_column,
            ),
            duckdb::params![key, value],
        )?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
