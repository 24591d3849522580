//! Diff command handler.
//!
//! Implements the `diff` subcommand for classifying two BOM snapshots.

use crate::config::AppConfig;
use crate::diff::{classify, BomDiff};
use crate::pipeline::{
    exit_codes, read_bom_with_context, should_use_color, write_output, OutputTarget,
};
use crate::reports::{create_reporter, ReportConfig};
use anyhow::Result;
use std::path::Path;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_diff(old: &Path, new: &Path, config: &AppConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let old_records = read_bom_with_context(old, quiet)?;
    let new_records = read_bom_with_context(new, quiet)?;

    let diff = classify(&old_records, &new_records);
    if !quiet {
        tracing::info!(
            identical = diff.summary.identical,
            new = diff.summary.new,
            obsolete = diff.summary.obsolete,
            major = diff.summary.major_updates,
            minor = diff.summary.minor_updates,
            "classification complete"
        );
    }

    let target = OutputTarget::from_option(config.output.file.clone());
    let report_config = ReportConfig {
        include_identical: config.diff.include_identical,
    };
    let reporter = create_reporter(
        config.output.format,
        !config.output.compact,
        should_use_color(&target),
    );
    let report = reporter.generate_diff_report(&diff, &report_config)?;
    write_output(&report, &target, quiet)?;

    Ok(determine_exit_code(config, &diff))
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &AppConfig, diff: &BomDiff) -> i32 {
    if config.behavior.fail_on_change && diff.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
