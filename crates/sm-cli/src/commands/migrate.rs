//! Migrate command implementation

use anyhow::{Context, Result};
use sm_core::ScriptRepository;
use sm_migrate::{DatabaseSettings, ManifestStore, MigrationExecutor};

use crate::cli::{GlobalArgs, MigrateArgs, OutputFormat};
use crate::commands::common::{load_config, print_fields, print_json, resolve_app_version};

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global, &args.connection)?;
    let app_version = resolve_app_version(&args.connection, &config)?;

    let db = sm_db::connect(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {} database", config.database.provider))?;

    let enabled = config.setup.auto_database_migration || args.force;
    if args.force && !config.setup.auto_database_migration {
        log::warn!("setup.auto_database_migration is false; running anyway because of --force");
    }
    let executor = MigrationExecutor::new(
        enabled,
        ScriptRepository::embedded(),
        ManifestStore::new(DatabaseSettings::new(db.as_ref(), config.settings.clone())),
    );

    let result = executor.try_migrate(db.as_ref(), &app_version).await;

    match global.output {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => {
            let mut fields = vec![
                ("status", result.status.to_string()),
                ("message", result.message.clone()),
            ];
            if let Some(name) = &result.script_name {
                fields.push(("script", name.clone()));
            }
            if let Some(checksum) = &result.checksum {
                fields.push(("sha256", checksum.clone()));
            }
            if result.script_name.is_some() {
                fields.push(("batches", result.batches_executed.to_string()));
            }
            if let Some(version) = &result.applied_version {
                fields.push(("installed", version.clone()));
            }
            print_fields(&fields);
        }
    }

    if result.status.is_failure() {
        anyhow::bail!("Schema migration did not complete: {result}");
    }
    Ok(())
}
