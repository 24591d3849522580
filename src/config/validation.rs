//! Configuration validation.

use super::types::{AppConfig, GranularityConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.granularity.validate());
        errors
    }
}

/// An output path whose directory is missing.
fn missing_parent(field: &str, file: Option<&std::path::Path>) -> Option<ConfigError> {
    let parent = file.and_then(std::path::Path::parent)?;
    if parent.as_os_str().is_empty() || parent.exists() {
        return None;
    }
    Some(ConfigError::new(
        field,
        format!("Parent directory does not exist: {}", parent.display()),
    ))
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        missing_parent("output.file", self.file.as_deref())
            .into_iter()
            .collect()
    }
}

impl Validatable for GranularityConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        errors.extend(missing_parent(
            "granularity.output_file",
            self.output_file.as_deref(),
        ));

        if self.rules_file.is_some() && self.rules_url.is_some() {
            errors.push(ConfigError::new(
                "granularity",
                "rules_file and rules_url are mutually exclusive",
            ));
        }

        if let Some(url) = &self.rules_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(ConfigError::new(
                    "granularity.rules_url",
                    format!("Expected an http(s) URL, got '{url}'"),
                ));
            }
            if !cfg!(feature = "remote-rules") {
                errors.push(ConfigError::new(
                    "granularity.rules_url",
                    "built without the remote-rules feature",
                ));
            }
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "granularity.timeout_secs",
                "Timeout must be greater than 0",
            ));
        }

        errors
    }
}
