//! Checksum command implementation

use anyhow::{Context, Result};
use sm_core::compute_checksum;

use crate::cli::{ChecksumArgs, GlobalArgs, OutputFormat};
use crate::commands::common::print_json;

fn checksum_file(path: &str) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
    Ok(compute_checksum(&bytes))
}

/// Execute the checksum command
pub fn execute(args: &ChecksumArgs, global: &GlobalArgs) -> Result<()> {
    let digest = checksum_file(&args.file)?;
    match global.output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "file": args.file,
            "sha256": digest,
        }))?,
        OutputFormat::Text => println!("{digest}  {}", args.file),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_file_matches_content_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.sql");
        std::fs::write(&path, "abc").unwrap();
        assert_eq!(
            checksum_file(path.to_str().unwrap()).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
