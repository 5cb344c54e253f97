//! Helpers shared by the command implementations.

use anyhow::{Context, Result};
use serde::Serialize;
use sm_core::Config;
use std::path::Path;

use crate::cli::{ConnectionArgs, GlobalArgs};

/// Load configuration from `--config`, or from `--dir`, then apply
/// connection overrides from flags/env.
pub(crate) fn load_config(global: &GlobalArgs, overrides: &ConnectionArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(Path::new(&global.dir)),
    }
    .context("Failed to load configuration")?;

    if let Some(conn) = &overrides.connection_string {
        log::debug!("Using connection string from command line or environment");
        config.database.connection_string = conn.clone();
    }
    log::debug!("Loaded config for {} provider", config.database.provider);
    Ok(config)
}

/// The version to migrate to: flag first, then config.
pub(crate) fn resolve_app_version(overrides: &ConnectionArgs, config: &Config) -> Result<String> {
    overrides
        .app_version
        .clone()
        .or_else(|| config.app_version.clone())
        .context("No application version given; pass --app-version or set app_version in the config")
}

/// Print `data` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Print aligned `label  value` lines.
pub(crate) fn print_fields(fields: &[(&str, String)]) {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in fields {
        println!("{label:<width$}  {value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(app_version: Option<&str>) -> ConnectionArgs {
        ConnectionArgs {
            app_version: app_version.map(str::to_string),
            connection_string: None,
        }
    }

    fn config(app_version: Option<&str>) -> Config {
        let mut yaml = String::from("database:\n  provider: duckdb\n  connection_string: \":memory:\"\n");
        if let Some(v) = app_version {
            yaml.push_str(&format!("app_version: \"{v}\"\n"));
        }
        Config::from_yaml(&yaml).unwrap()
    }

    #[test]
    fn test_flag_version_wins() {
        let v = resolve_app_version(&overrides(Some("2.0.0")), &config(Some("1.0.0"))).unwrap();
        assert_eq!(v, "2.0.0");
    }

    #[test]
    fn test_config_version_fallback() {
        let v = resolve_app_version(&overrides(None), &config(Some("1.0.0"))).unwrap();
        assert_eq!(v, "1.0.0");
    }

    #[test]
    fn test_missing_version_is_error() {
        assert!(resolve_app_version(&overrides(None), &config(None)).is_err());
    }

    #[test]
    fn test_load_config_with_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("schema-migration.yml"),
            "database:\n  provider: mysql\n  connection_string: \"mysql://old\"\n",
        )
        .unwrap();
        let global = GlobalArgs {
            verbose: false,
            dir: dir.path().display().to_string(),
            config: None,
            output: crate::cli::OutputFormat::Text,
        };
        let args = ConnectionArgs {
            app_version: None,
            connection_string: Some("mysql://new".to_string()),
        };
        let config = load_config(&global, &args).unwrap();
        assert_eq!(config.database.connection_string, "mysql://new");
    }
}
