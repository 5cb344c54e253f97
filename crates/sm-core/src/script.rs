//! Embedded, dialect-specific schema scripts and their resolution.
//!
//! Each schema-bearing application release ships one script per dialect.
//! Scripts are compiled into the binary via `include_str!` and looked up by
//! a stable `schema-<slug>-<token>` name. The token for a release is taken
//! from [`REVISIONS`], a table maintained next to the scripts, because
//! schema revisions do not line up with every minor release.

use crate::checksum::compute_checksum;
use crate::dialect::Dialect;
use crate::version::SchemaVersion;
use std::collections::HashMap;

/// A schema revision: the first application version that needs it and the
/// script token for each dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRevision {
    /// First `(major, minor)` whose schema is described by this revision.
    pub since: (u64, u64),
    pub sqlserver: &'static str,
    pub mysql: &'static str,
    pub postgresql: &'static str,
}

impl SchemaRevision {
    pub fn token(&self, dialect: Dialect) -> &'static str {
        match dialect {
            Dialect::SqlServer => self.sqlserver,
            Dialect::MySql => self.mysql,
            Dialect::PostgreSql => self.postgresql,
        }
    }
}

/// Known schema revisions, oldest first.
pub static REVISIONS: &[SchemaRevision] = &[SchemaRevision {
    since: (14, 0),
    sqlserver: "140",
    mysql: "8",
    postgresql: "14",
}];

/// Build the resource name for a dialect and script token.
pub fn script_name(dialect: Dialect, token: &str) -> String {
    format!("schema-{}-{}", dialect.slug(), token)
}

/// A script as compiled into (or registered with) the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    pub name: String,
    pub raw_content: String,
}

impl MigrationScript {
    pub fn new(name: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_content: raw_content.into(),
        }
    }

    /// SHA-256 hex digest of the raw UTF-8 script bytes.
    pub fn checksum(&self) -> String {
        compute_checksum(self.raw_content.as_bytes())
    }
}

/// Name-keyed script storage.
pub trait ScriptSource: Send + Sync {
    /// Return the raw SQL for `name`, if present.
    fn lookup(&self, name: &str) -> Option<String>;

    /// All script names this source knows about, sorted.
    fn names(&self) -> Vec<String>;
}

struct EmbeddedScript {
    name: &'static str,
    sql: &'static str,
}

static EMBEDDED: &[EmbeddedScript] = &[
    EmbeddedScript {
        name: "schema-mssql-140",
        sql: include_str!("../scripts/schema-mssql-140.sql"),
    },
    EmbeddedScript {
        name: "schema-mysql-8",
        sql: include_str!("../scripts/schema-mysql-8.sql"),
    },
    EmbeddedScript {
        name: "schema-postgresql-14",
        sql: include_str!("../scripts/schema-postgresql-14.sql"),
    },
];

/// Scripts compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedScripts;

impl ScriptSource for EmbeddedScripts {
    fn lookup(&self, name: &str) -> Option<String> {
        EMBEDDED
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.sql.to_string())
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = EMBEDDED.iter().map(|s| s.name.to_string()).collect();
        names.sort();
        names
    }
}

/// In-memory scripts, for tests and hosts that ship scripts some other way.
#[derive(Debug, Clone, Default)]
pub struct MemoryScripts {
    scripts: HashMap<String, String>,
}

impl MemoryScripts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, sql: impl Into<String>) -> Self {
        self.insert(name, sql);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, sql: impl Into<String>) {
        self.scripts.insert(name.into(), sql.into());
    }
}

impl ScriptSource for MemoryScripts {
    fn lookup(&self, name: &str) -> Option<String> {
        self.scripts.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scripts.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Resolves the script for a dialect and target application version.
pub struct ScriptRepository {
    source: Box<dyn ScriptSource>,
    revisions: Vec<SchemaRevision>,
}

impl Default for ScriptRepository {
    fn default() -> Self {
        Self::embedded()
    }
}

impl ScriptRepository {
    /// Repository over the compiled-in scripts and revision table.
    pub fn embedded() -> Self {
        Self::new(EmbeddedScripts, REVISIONS.to_vec())
    }

    /// Repository over any source and revision table.
    ///
    /// Revisions are sorted by `since` so lookup can pick the newest match.
    pub fn new(source: impl ScriptSource + 'static, mut revisions: Vec<SchemaRevision>) -> Self {
        revisions.sort_by_key(|r| r.since);
        Self {
            source: Box::new(source),
            revisions,
        }
    }

    /// The newest revision whose `since` is at or below `target`.
    pub fn revision_for(&self, target: &SchemaVersion) -> Option<&SchemaRevision> {
        self.revisions
            .iter()
            .rev()
            .find(|r| r.since <= target.schema_key())
    }

    /// The resource name that would be used for `dialect` at `target`.
    pub fn script_name_for(&self, dialect: Dialect, target: &SchemaVersion) -> Option<String> {
        self.revision_for(target)
            .map(|rev| script_name(dialect, rev.token(dialect)))
    }

    /// Resolve the script for `dialect` at `target`.
    ///
    /// `None` when no revision covers the target or the named script is not
    /// present in the source.
    pub fn resolve(&self, dialect: Dialect, target: &SchemaVersion) -> Option<MigrationScript> {
        let name = self.script_name_for(dialect, target)?;
        let Some(sql) = self.source.lookup(&name) else {
            log::debug!("Script {name} not found for {dialect} {target}");
            return None;
        };
        Some(MigrationScript::new(name, sql))
    }

    /// All script names known to the underlying source.
    pub fn names(&self) -> Vec<String> {
        self.source.names()
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
