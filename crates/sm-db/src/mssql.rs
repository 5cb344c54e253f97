//! SQL Server backend (tiberius)
//!
//! Batches go over the wire as plain SQL batches (`simple_query`); the
//! `GO` separator has already been stripped by the batch splitter.

use crate::error::{DbError, DbResult};
use crate::traits::{check_identifiers, Database};
use async_trait::async_trait;
use sm_core::config::SettingsTable;
use tiberius::{Client, Config};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

type MssqlClient = Client<Compat<TcpStream>>;

/// SQL Server database backend
pub struct SqlServerBackend {
    client: Mutex<MssqlClient>,
}

impl SqlServerBackend {
    /// Connect with an ADO.NET style connection string
    /// (`server=tcp:host,1433;database=blog;user=sa;password=...`).
    pub async fn connect(connection_string: &str) -> DbResult<Self> {
        let config = Config::from_ado_string(connection_string)
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        tcp.set_nodelay(true)
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client: Mutex::new(client),
        })
    }

    async fn ensure_settings_table(
        client: &mut MssqlClient,
        table: &SettingsTable,
    ) -> DbResult<()> {
        let sql = format!(
            "IF OBJECT_ID(N'[{t}]', N'U') IS NULL \
             CREATE TABLE [{t}] ([{k}] NVARCHAR(64) NOT NULL PRIMARY KEY, [{v}] NVARCHAR(MAX) NULL)",
            t = table.table,
            k = table.key_column,
            v = table.value_column,
        );
        client.simple_query(sql).await?.into_results().await?;
        Ok(())
    }

    async fn table_exists(client: &mut MssqlClient, name: &str) -> DbResult<bool> {
        let row = client
            .query(
                "SELECT CASE WHEN OBJECT_ID(@P1, N'U') IS NULL THEN 0 ELSE 1 END",
                &[&name],
            )
            .await?
            .into_row()
            .await?;
        match row {
            Some(row) => Ok(row.try_get::<i32, _>(0)? == Some(1)),
            None => Ok(false),
        }
    }
}

#[async_trait]
impl Database for SqlServerBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let mut client = self.client.lock().await;
        // drain every result set so errors raised late in the batch surface
        client.simple_query(sql).await?.into_results().await?;
        Ok(())
    }

    async fn read_setting(&self, table: &SettingsTable, key: &str) -> DbResult<Option<String>> {
        check_identifiers(table)?;
        let mut client = self.client.lock().await;
        if !Self::table_exists(&mut client, &table.table).await? {
            return Ok(None);
        }

        let sql = format!(
            "SELECT [{v}] FROM [{t}] WHERE [{k}] = @P1",
            t = table.table,
            k = table.key_column,
            v = table.value_column,
        );
        let row = client.query(sql, &[&key]).await?.into_row().await?;
        match row {
            Some(row) => Ok(row.try_get::<&str, _>(0)?.map(str::to_string)),
            None => Ok(None),
        }
    }

    async fn write_setting(&self, table: &SettingsTable, key: &str, value: &str) -> DbResult<()> {
        check_identifiers(table)?;
        let mut client = self.client.lock().await;
        Self::ensure_settings_table(&mut client, table).await?;

        let sql = format!(
            "MERGE [{t}] AS target \
             USING (SELECT @P1 AS cfg_key, @P2 AS cfg_value) AS source \
             ON target.[{k}] = source.cfg_key \
             WHEN MATCHED THEN UPDATE SET [{v}] = source.cfg_value \
             WHEN NOT MATCHED THEN INSERT ([{k}], [{v}]) VALUES (source.cfg_key, source.cfg_value);",
            t = table.table,
            k = table.key_column,
            v = table.value_column,
        );
        client.execute(sql, &[&key, &value]).await?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "sqlserver"
    }
}
