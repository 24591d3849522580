//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::diff::{BomDiff, DiffResultKind};
use crate::error::Result;
use crate::granularity::ConsolidationResult;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn kind_color(kind: DiffResultKind) -> &'static str {
    match kind {
        DiffResultKind::Identical => "dim",
        DiffResultKind::New => "green",
        DiffResultKind::Obsolete => "red",
        DiffResultKind::MajorUpdate => "yellow",
        DiffResultKind::MinorUpdate => "cyan",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(&self, diff: &BomDiff, config: &ReportConfig) -> Result<String> {
        let mut lines = Vec::new();

        lines.push(self.color("BOM Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let entries = diff.entries(config.include_identical);
        if entries.is_empty() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }
        for entry in entries {
            lines.push(format!(
                "  {}  {}",
                self.color(&format!("{:<13}", entry.result.as_str()), kind_color(entry.result)),
                match &entry.version_old {
                    Some(old) => format!("{} {old} → {}", entry.name, entry.version),
                    None => format!("{} {}", entry.name, entry.version),
                }
            ));
        }

        lines.push(String::new());
        lines.push(self.color("Counts:", "bold"));
        for kind in DiffResultKind::ALL {
            lines.push(format!(
                "  {:<13} {}",
                kind.as_str(),
                diff.summary.count(kind)
            ));
        }

        Ok(lines.join("\n"))
    }

    fn generate_consolidation_report(&self, result: &ConsolidationResult) -> Result<String> {
        let mut lines = Vec::new();

        lines.push(self.color("Granularity Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        for sub in &result.substitutions {
            lines.push(format!(
                "  {} → {} {}",
                sub.from,
                self.color(&sub.to, "green"),
                sub.version
            ));
        }
        if result.substitutions.is_empty() {
            lines.push(format!("  {}", self.color("No substitutions", "dim")));
        }

        lines.push(String::new());
        lines.push(format!(
            "{}  {} components, {} removed",
            self.color("Result:", "cyan"),
            result.records.len(),
            result.reduction_count
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::classify;
    use crate::granularity::{consolidate, GranularityRule, RuleTable};
    use crate::model::ComponentRecord;

    #[test]
    fn test_diff_summary_lists_changes_and_counts() {
        let diff = classify(
            &[
                ComponentRecord::new("openssl", "1.1.1"),
                ComponentRecord::new("zlib", "1.2.13"),
            ],
            &[
                ComponentRecord::new("openssl", "3.0.8"),
                ComponentRecord::new("zlib", "1.2.13"),
                ComponentRecord::new("curl", "8.0.1"),
            ],
        );
        let text = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&diff, &ReportConfig::default())
            .expect("report");

        assert!(text.contains("MAJOR_UPDATE"));
        assert!(text.contains("openssl 1.1.1 → 3.0.8"));
        assert!(text.contains("curl 8.0.1"));
        assert!(!text.contains("zlib 1.2.13"));
        assert!(text.contains("IDENTICAL     1"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_no_changes() {
        let records = vec![ComponentRecord::new("zlib", "1.3")];
        let diff = classify(&records, &records);
        let text = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&diff, &ReportConfig::default())
            .expect("report");
        assert!(text.contains("No changes"));
    }

    #[test]
    fn test_consolidation_summary() {
        let rules = RuleTable::builder()
            .rule(GranularityRule::new("@angular/core", "Angular"))
            .build();
        let result = consolidate(&[ComponentRecord::new("@angular/core", "15.2.6")], &rules);
        let text = SummaryReporter::new()
            .no_color()
            .generate_consolidation_report(&result)
            .expect("report");
        assert!(text.contains("@angular/core → Angular 15.2.6"));
        assert!(text.contains("1 components, 0 removed"));
    }
}
