//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// smig - catch a database schema up to the application version
#[derive(Parser, Debug)]
#[command(name = "smig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory searched for schema-migration.yml
    #[arg(short = 'd', long, global = true, default_value = ".")]
    pub dir: String,

    /// Explicit config file path
    #[arg(short, long, global = true, env = "SMIG_CONFIG")]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON document
    Json,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate the schema to the application version
    Migrate(MigrateArgs),

    /// Show installed and target versions without changing anything
    Status(StatusArgs),

    /// Show which embedded script a dialect and version resolve to
    Script(ScriptArgs),

    /// Split a script file into the batches that would be executed
    Split(SplitArgs),

    /// Print the SHA-256 checksum of a script file
    Checksum(ChecksumArgs),
}

/// Connection overrides shared by commands that open the database
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Application version to migrate to (overrides app_version in config)
    #[arg(long, env = "SMIG_APP_VERSION")]
    pub app_version: Option<String>,

    /// Connection string (overrides database.connection_string in config)
    #[arg(long, env = "SMIG_CONNECTION_STRING", hide_env_values = true)]
    pub connection_string: Option<String>,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Run even when setup.auto_database_migration is false
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Arguments for the script command
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Dialect (sqlserver, mysql, postgresql)
    #[arg(long)]
    pub dialect: String,

    /// Application version (major.minor.patch)
    #[arg(long = "app-version")]
    pub app_version: String,

    /// Print the script body
    #[arg(long)]
    pub show: bool,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Script file to split
    #[arg(short, long)]
    pub file: String,
}

/// Arguments for the checksum command
#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// File to hash
    #[arg(short, long)]
    pub file: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
