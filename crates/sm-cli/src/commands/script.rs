//! Script command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sm_core::{split_batches, Dialect, ScriptRepository, SchemaVersion};

use crate::cli::{GlobalArgs, OutputFormat, ScriptArgs};
use crate::commands::common::{print_fields, print_json};

#[derive(Debug, Serialize)]
struct ScriptReport {
    dialect: Dialect,
    name: String,
    sha256: String,
    batches: usize,
}

/// Execute the script command
pub fn execute(args: &ScriptArgs, global: &GlobalArgs) -> Result<()> {
    let dialect: Dialect = args.dialect.parse()?;
    let version: SchemaVersion = args.app_version.parse()?;

    let scripts = ScriptRepository::embedded();
    let script = scripts.resolve(dialect, &version).with_context(|| {
        format!(
            "No embedded {dialect} script for {version} (available: {})",
            scripts.names().join(", ")
        )
    })?;

    let report = ScriptReport {
        dialect,
        name: script.name.clone(),
        sha256: script.checksum(),
        batches: split_batches(&script.raw_content).len(),
    };

    match global.output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            print_fields(&[
                ("dialect", report.dialect.to_string()),
                ("script", report.name.clone()),
                ("sha256", report.sha256.clone()),
                ("batches", report.batches.to_string()),
            ]);
            if args.show {
                println!();
                println!("{}", script.raw_content);
            }
        }
    }
    Ok(())
}
