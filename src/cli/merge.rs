//! Merge command handler.

use crate::bom::write_bom;
use crate::config::AppConfig;
use crate::merge::merge;
use crate::pipeline::{exit_codes, read_bom_with_context};
use anyhow::{Context, Result};
use std::path::Path;

/// Merge two BOM files into `output`, returning the exit code.
pub fn run_merge(first: &Path, second: &Path, output: &Path, config: &AppConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let first_records = read_bom_with_context(first, quiet)?;
    let second_records = read_bom_with_context(second, quiet)?;

    let merged = merge(&first_records, &second_records);
    write_bom(&merged, output)
        .with_context(|| format!("Failed to write merged BOM to {}", output.display()))?;

    if !quiet {
        tracing::info!(
            components = merged.len(),
            duplicates = first_records.len() + second_records.len() - merged.len(),
            "Merged BOM written to {}",
            output.display()
        );
    }
    Ok(exit_codes::SUCCESS)
}
