//! Backend construction from configuration.

use crate::duckdb::DuckDbBackend;
use crate::error::DbResult;
use crate::mssql::SqlServerBackend;
use crate::mysql::MySqlBackend;
use crate::postgres::PostgresBackend;
use crate::traits::Database;
use sm_core::config::{DatabaseConfig, ProviderKind};

/// Open the backend named by `config.provider`.
pub async fn connect(config: &DatabaseConfig) -> DbResult<Box<dyn Database>> {
    log::debug!("Connecting to {} database", config.provider);

    let db: Box<dyn Database> = match config.provider {
        ProviderKind::SqlServer => {
            Box::new(SqlServerBackend::connect(&config.connection_string).await?)
        }
        ProviderKind::MySql => Box::new(MySqlBackend::connect(&config.connection_string).await?),
        ProviderKind::PostgreSql => {
            Box::new(PostgresBackend::connect(&config.connection_string).await?)
        }
        ProviderKind::DuckDb => Box::new(DuckDbBackend::new(&config.connection_string)?),
    };
    Ok(db)
}
