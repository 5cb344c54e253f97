//! Supported database dialects.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three engines that ship schema scripts.
///
/// Derived at runtime from the active backend; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    SqlServer,
    MySql,
    PostgreSql,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::SqlServer, Dialect::MySql, Dialect::PostgreSql];

    /// Short identifier used in script resource names.
    pub fn slug(self) -> &'static str {
        match self {
            Dialect::SqlServer => "mssql",
            Dialect::MySql => "mysql",
            Dialect::PostgreSql => "postgresql",
        }
    }

    /// Whether scripts for this dialect are split on `GO` lines.
    pub fn uses_batch_separator(self) -> bool {
        matches!(self, Dialect::SqlServer)
    }

    /// Whether DDL can be rolled back inside a transaction.
    pub fn supports_transactional_ddl(self) -> bool {
        matches!(self, Dialect::PostgreSql)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::SqlServer => write!(f, "sqlserver"),
            Dialect::MySql => write!(f, "mysql"),
            Dialect::PostgreSql => write!(f, "postgresql"),
        }
    }
}

impl FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            "mysql" => Ok(Dialect::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSql),
            other => Err(CoreError::UnknownDialect(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs() {
        assert_eq!(Dialect::SqlServer.slug(), "mssql");
        assert_eq!(Dialect::MySql.slug(), "mysql");
        assert_eq!(Dialect::PostgreSql.slug(), "postgresql");
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("MSSQL".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert!("sqlite".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for d in Dialect::ALL {
            assert_eq!(d.to_string().parse::<Dialect>().unwrap(), d);
        }
    }

    #[test]
    fn test_only_sqlserver_splits_on_go() {
        assert!(Dialect::SqlServer.uses_batch_separator());
        assert!(!Dialect::MySql.uses_batch_separator());
        assert!(!Dialect::PostgreSql.uses_batch_separator());
    }
}
