//! sm-db - Database abstraction layer for schema-migrate
//!
//! This crate provides the `Database` trait the migration executor runs
//! batches through, and backends for SQL Server (tiberius), MySQL and
//! PostgreSQL (sqlx), and an in-process DuckDB engine.

pub mod connect;
pub mod duckdb;
pub mod error;
pub mod mssql;
pub mod mysql;
pub mod postgres;
pub mod traits;

pub use connect::connect;
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use mssql::SqlServerBackend;
pub use mysql::MySqlBackend;
pub use postgres::PostgresBackend;
pub use traits::Database;
