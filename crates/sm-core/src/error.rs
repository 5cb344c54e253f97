//! Error types for sm-core

use thiserror::Error;

/// Core error type for schema-migrate
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: IO error with file path context
    #[error("[C003] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C004: Malformed `major.minor.patch` version string
    #[error("[C004] Invalid version '{input}': {reason}")]
    VersionParse { input: String, reason: String },

    /// C005: Unrecognized dialect name
    #[error("[C005] Unknown dialect '{0}' (expected sqlserver, mysql or postgresql)")]
    UnknownDialect(String),

    /// C006: Stored manifest could not be decoded or encoded
    #[error("[C006] Malformed system manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// C007: YAML parse error
    #[error("[C007] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
