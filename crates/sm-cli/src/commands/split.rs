//! Split command implementation

use anyhow::{Context, Result};
use sm_core::split_batches;

use crate::cli::{GlobalArgs, OutputFormat, SplitArgs};
use crate::commands::common::print_json;

/// Read `path` and split it into batches.
fn split_file(path: &str) -> Result<Vec<String>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    Ok(split_batches(&content))
}

/// Execute the split command
pub fn execute(args: &SplitArgs, global: &GlobalArgs) -> Result<()> {
    let batches = split_file(&args.file)?;

    match global.output {
        OutputFormat::Json => print_json(&batches)?,
        OutputFormat::Text => {
            for (idx, batch) in batches.iter().enumerate() {
                println!("-- batch {} of {}", idx + 1, batches.len());
                println!("{batch}");
            }
        }
    }
    Ok(())
}
