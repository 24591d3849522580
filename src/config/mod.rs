//! Configuration for bom-reconciler.
//!
//! - Typed configuration structures with JSON Schema support
//! - Validation through the [`Validatable`] trait
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.bom-reconciler.yaml` file in your project root or
//! `~/.config/bom-reconciler/`:
//!
//! ```yaml
//! output:
//!   format: summary
//! granularity:
//!   rules_file: ./granularity.csv
//! behavior:
//!   fail_on_change: true
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, GranularityConfig, OutputConfig,
    DEFAULT_RULES_TIMEOUT_SECS,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    search_dirs, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option accepted in `.bom-reconciler.yaml`
/// files and can be used by editors for validation and autocompletion.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
