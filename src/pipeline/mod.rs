//! Pipeline orchestration shared by the CLI command handlers.
//!
//! Covers the read → reconcile → write steps around the engines: loading BOM
//! files with context, resolving the granularity rule table from
//! configuration, and writing reports to stdout or a file.

mod output;
mod parse;
mod rules;

pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::read_bom_with_context;
pub use rules::load_rule_table;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success, or changes found without `--fail-on-change`
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
