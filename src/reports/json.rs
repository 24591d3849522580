//! JSON report generator.

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::diff::BomDiff;
use crate::error::Result;
use crate::granularity::ConsolidationResult;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsolidationReport<'a> {
    component_count: usize,
    reduction_count: usize,
    substitutions: &'a [crate::granularity::Substitution],
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(&self, diff: &BomDiff, config: &ReportConfig) -> Result<String> {
        self.render(diff.entries(config.include_identical))
    }

    fn generate_consolidation_report(&self, result: &ConsolidationResult) -> Result<String> {
        self.render(&ConsolidationReport {
            component_count: result.records.len(),
            reduction_count: result.reduction_count,
            substitutions: &result.substitutions,
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
