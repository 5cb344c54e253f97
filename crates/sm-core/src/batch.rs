//! Splitting raw scripts into independently executable batches.
//!
//! SQL Server tooling uses a line containing only `GO` as a client-side
//! batch terminator. It is not T-SQL and must never reach the server.

use regex::Regex;
use std::sync::OnceLock;

static GO_SEPARATOR: OnceLock<Regex> = OnceLock::new();

fn go_separator() -> &'static Regex {
    GO_SEPARATOR.get_or_init(|| Regex::new(r"(?im)^\s*GO\s*$").expect("valid regex"))
}

/// Split `script` on `GO` lines, trimming each batch and dropping empty ones.
///
/// Scripts without `GO` lines come back as a single batch (or none when the
/// script is blank). Batches keep their source order.
pub fn split_batches(script: &str) -> Vec<String> {
    go_separator()
        .split(script)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
