//! Configuration types for bom-reconciler operations.

use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default timeout for remote rule tables, in seconds
pub const DEFAULT_RULES_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// Config files and CLI arguments both produce an `AppConfig`; the CLI one is
/// merged over the file one with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Output configuration (format, file)
    pub output: OutputConfig,
    /// Diff classification options
    pub diff: DiffConfig,
    /// Granularity rule table source
    pub granularity: GranularityConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the report format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the diff report file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Emit compact JSON.
    pub const fn compact(mut self, compact: bool) -> Self {
        self.config.output.compact = compact;
        self
    }

    /// Include `IDENTICAL` entries in diff reports.
    pub const fn include_identical(mut self, include: bool) -> Self {
        self.config.diff.include_identical = include;
        self
    }

    /// Load granularity rules from a local file.
    pub fn rules_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.granularity.rules_file = file;
        self
    }

    /// Load granularity rules from a URL.
    pub fn rules_url(mut self, url: Option<String>) -> Self {
        self.config.granularity.rules_url = url;
        self
    }

    /// Set the file the consolidated BOM is written to.
    pub fn granularity_output(mut self, file: Option<PathBuf>) -> Self {
        self.config.granularity.output_file = file;
        self
    }

    /// Set the remote rule table timeout.
    pub const fn rules_timeout_secs(mut self, secs: u64) -> Self {
        self.config.granularity.timeout_secs = secs;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format for `diff`
    pub format: ReportFormat,
    /// Diff report file (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Emit JSON on a single line
    pub compact: bool,
}

/// Diff classification options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffConfig {
    /// Report `IDENTICAL` entries as well as differences
    pub include_identical: bool,
}

/// Where the granularity rule table comes from.
///
/// `rules_file` and `rules_url` are mutually exclusive; with neither set the
/// bundled table is used unless `use_bundled_rules` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GranularityConfig {
    /// Path to a `;`-separated rule table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
    /// URL of a `;`-separated rule table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_url: Option<String>,
    /// Fall back to the bundled table
    pub use_bundled_rules: bool,
    /// Timeout for downloading `rules_url`
    pub timeout_secs: u64,
    /// Consolidated BOM file (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

impl Default for GranularityConfig {
    fn default() -> Self {
        Self {
            rules_file: None,
            rules_url: None,
            use_bundled_rules: true,
            timeout_secs: DEFAULT_RULES_TIMEOUT_SECS,
            output_file: None,
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if the diff finds any difference
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
