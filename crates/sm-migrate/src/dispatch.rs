//! Maps the active backend to the dialect whose scripts it can run.

use sm_core::Dialect;
use sm_db::Database;
use std::fmt;

/// The backend is not one of the engines that ship schema scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedProvider(pub String);

impl fmt::Display for UnsupportedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "database provider '{}' has no schema scripts", self.0)
    }
}

/// Determine the dialect of `db`.
///
/// Anything other than the three known backends fails closed: running one
/// engine's DDL against another is never attempted.
pub fn detect_dialect(db: &dyn Database) -> Result<Dialect, UnsupportedProvider> {
    match db.db_type() {
        "sqlserver" => Ok(Dialect::SqlServer),
        "mysql" => Ok(Dialect::MySql),
        "postgresql" => Ok(Dialect::PostgreSql),
        other => Err(UnsupportedProvider(other.to_string())),
    }
}
