//! Granularity command handler.
//!
//! Implements the `granularity` subcommand, which replaces fine-grained
//! components by their coarse counterparts.

use crate::bom::bom_to_string;
use crate::config::AppConfig;
use crate::granularity::consolidate;
use crate::pipeline::{
    exit_codes, load_rule_table, read_bom_with_context, write_output, OutputTarget,
};
use crate::reports::{ReportGenerator, SummaryReporter};
use anyhow::Result;
use std::path::Path;

/// Consolidate the BOM at `input` and write it to `granularity.output_file`
/// or stdout.
///
/// A summary of the substitutions goes to stderr unless quiet.
pub fn run_granularity(input: &Path, config: &AppConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let records = read_bom_with_context(input, quiet)?;
    let rules = load_rule_table(&config.granularity)?;

    let result = consolidate(&records, &rules);
    if !quiet {
        tracing::info!(
            substitutions = result.substitutions.len(),
            reduced = result.reduction_count,
            "granularity consolidation complete"
        );
    }

    let target = OutputTarget::from_option(config.granularity.output_file.clone());
    let bom = bom_to_string(&result.records, !config.output.compact)?;
    write_output(&bom, &target, quiet)?;

    if !quiet {
        let summary = SummaryReporter::new()
            .no_color()
            .generate_consolidation_report(&result)?;
        eprintln!("{summary}");
    }
    Ok(exit_codes::SUCCESS)
}
