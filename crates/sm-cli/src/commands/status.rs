//! Status command implementation
//!
//! Reports what `migrate` would decide without touching the schema.

use anyhow::{Context, Result};
use serde::Serialize;
use sm_core::{needs_migration, ScriptRepository};
use sm_migrate::{detect_dialect, DatabaseSettings, ManifestStore};

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::{load_config, print_fields, print_json, resolve_app_version};

#[derive(Debug, Serialize)]
struct StatusReport {
    provider: String,
    auto_database_migration: bool,
    installed_version: String,
    installed_at: Option<String>,
    applied_script_checksum: Option<String>,
    app_version: String,
    decision: String,
    script: Option<String>,
}

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global, &args.connection)?;
    let app_version = resolve_app_version(&args.connection, &config)?;

    let db = sm_db::connect(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {} database", config.database.provider))?;

    let store = ManifestStore::new(DatabaseSettings::new(db.as_ref(), config.settings.clone()));
    let manifest = store.read().await.context("Failed to read system manifest")?;
    if manifest.is_unset() {
        log::info!("No system manifest recorded yet");
    }

    let scripts = ScriptRepository::embedded();
    let (decision, script) = match needs_migration(&manifest.version_string, &app_version) {
        Err(e) => (format!("version error: {e}"), None),
        Ok(d) if !d.required => ("up to date".to_string(), None),
        Ok(d) if d.is_downgrade => ("downgrade (unsupported)".to_string(), None),
        Ok(d) => match detect_dialect(db.as_ref()) {
            Err(e) => (format!("migration required, but {e}"), None),
            Ok(dialect) => {
                let name = scripts.script_name_for(dialect, &d.current);
                let present = scripts.resolve(dialect, &d.current).is_some();
                let decision = if present {
                    "migration required".to_string()
                } else {
                    "migration required, but no script is embedded".to_string()
                };
                (decision, name)
            }
        },
    };

    let report = StatusReport {
        provider: db.db_type().to_string(),
        auto_database_migration: config.setup.auto_database_migration,
        installed_version: manifest.version_string.clone(),
        installed_at: (!manifest.is_unset()).then(|| manifest.install_time_utc.to_rfc3339()),
        applied_script_checksum: manifest.applied_script_checksum.clone(),
        app_version,
        decision,
        script,
    };

    match global.output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_fields(&[
            ("provider", report.provider.clone()),
            ("auto migration", report.auto_database_migration.to_string()),
            ("installed", report.installed_version.clone()),
            (
                "installed at",
                report.installed_at.clone().unwrap_or_else(|| "-".to_string()),
            ),
            ("app version", report.app_version.clone()),
            ("decision", report.decision.clone()),
            ("script", report.script.clone().unwrap_or_else(|| "-".to_string())),
        ]),
    }
    Ok(())
}
