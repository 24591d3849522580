//! Report generation for reconciliation results.
//!
//! Two formats are available:
//! - JSON: the classification entries (`name`, `version`, `versionOld`,
//!   `result`) for programmatic use
//! - Summary: a compact listing for terminals and CI logs

mod json;
mod summary;

pub use json::JsonReporter;
pub use summary::SummaryReporter;

use crate::diff::BomDiff;
use crate::error::Result;
use crate::granularity::ConsolidationResult;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Array of classification entries
    #[default]
    Json,
    /// Human-readable listing with counts
    Summary,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Options shared by all reporters
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Include `IDENTICAL` entries
    pub include_identical: bool,
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a diff classification
    fn generate_diff_report(&self, diff: &BomDiff, config: &ReportConfig) -> Result<String>;

    /// Render the outcome of a granularity consolidation
    fn generate_consolidation_report(&self, result: &ConsolidationResult) -> Result<String>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create the reporter for a format. `pretty` applies to JSON, `color` to
/// the summary.
#[must_use]
pub fn create_reporter(
    format: ReportFormat,
    pretty: bool,
    color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Json => Box::new(JsonReporter::new().pretty(pretty)),
        ReportFormat::Summary if color => Box::new(SummaryReporter::new()),
        ReportFormat::Summary => Box::new(SummaryReporter::new().no_color()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_matches_format() {
        for format in [ReportFormat::Json, ReportFormat::Summary] {
            assert_eq!(create_reporter(format, true, false).format(), format);
        }
    }

    #[test]
    fn test_create_reporter_respects_color() {
        use crate::diff::classify;
        use crate::model::ComponentRecord;

        let diff = classify(
            &[ComponentRecord::new("openssl", "1.1.1")],
            &[ComponentRecord::new("openssl", "3.0.8")],
        );
        let config = ReportConfig::default();

        let plain = create_reporter(ReportFormat::Summary, true, false)
            .generate_diff_report(&diff, &config)
            .expect("report");
        let colored = create_reporter(ReportFormat::Summary, true, true)
            .generate_diff_report(&diff, &config)
            .expect("report");
        assert!(!plain.contains('\x1b'));
        assert!(colored.contains('\x1b'));

        let compact = create_reporter(ReportFormat::Json, false, true)
            .generate_diff_report(&diff, &config)
            .expect("report");
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_format_display_matches_value_names() {
        for format in ReportFormat::value_variants() {
            let name = format
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default();
            assert_eq!(format.to_string(), name);
        }
    }
}
