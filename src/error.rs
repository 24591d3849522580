//! Unified error types for bom-reconciler.
//!
//! The reconciliation engines themselves never fail; errors originate in the
//! collaborators around them (BOM reading/writing, rule table loading and
//! configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bom-reconciler operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReconcileError {
    /// Errors while reading a BOM document
    #[error("Failed to parse BOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while loading a granularity rule table
    #[error("Failed to load granularity rules: {context}")]
    Rules {
        context: String,
        #[source]
        source: RulesErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Not a CycloneDX document - missing or unexpected bomFormat '{0}'")]
    UnknownFormat(String),

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },
}

/// Specific rule table error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RulesErrorKind {
    #[error("Malformed rule table: {0}")]
    Malformed(String),

    #[error("Missing column '{0}' in rule table header")]
    MissingColumn(String),

    #[error("Remote request failed: {0}")]
    Remote(String),

    #[error("Remote rule tables are not supported in this build: {0}")]
    RemoteUnsupported(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for bom-reconciler operations
pub type Result<T> = std::result::Result<T, ReconcileError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ReconcileError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a document that is not CycloneDX
    pub fn unknown_format(found: impl Into<String>) -> Self {
        Self::parse("checking document format", ParseErrorKind::UnknownFormat(found.into()))
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a rule table error with context
    pub fn rules(context: impl Into<String>, source: RulesErrorKind) -> Self {
        Self::Rules {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ReconcileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ReconcileError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<csv::Error> for ReconcileError {
    fn from(err: csv::Error) -> Self {
        Self::rules("reading table", RulesErrorKind::Malformed(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain, so an error that travels through several layers
/// reads `outer: middle: inner`.
///
/// # Example
///
/// ```ignore
/// use bom_reconciler::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<Vec<ComponentRecord>> {
///     let content = std::fs::read_to_string(path).context("reading BOM file")?;
///     parse_bom_str(&content).with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ReconcileError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ReconcileError, new_ctx: &str) -> ReconcileError {
    match err {
        ReconcileError::Parse {
            context: existing,
            source,
        } => ReconcileError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ReconcileError::Rules {
            context: existing,
            source,
        } => ReconcileError::Rules {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ReconcileError::Io {
            path,
            message,
            source,
        } => ReconcileError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ReconcileError::Config(msg) => ReconcileError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReconcileError::unknown_format("SPDX");
        let display = err.to_string();
        assert!(display.contains("parse BOM"), "unexpected message: {display}");

        let err = ReconcileError::missing_field("name", "component #3");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Missing required field: name in component #3")
        );
    }

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ReconcileError::io("/path/to/bom.json", io_err);

        assert!(err.to_string().contains("/path/to/bom.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(ReconcileError::rules(
                "base",
                RulesErrorKind::MissingColumn("component_name".to_string()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(ReconcileError::Rules { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Rules error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(ReconcileError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_json_error_converts_to_parse() {
        let err: ReconcileError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(
            err,
            ReconcileError::Parse {
                source: ParseErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
