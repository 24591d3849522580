//! **Reconciliation of software bills of materials.**
//!
//! `bom-reconciler` compares, merges and cleans up lists of third-party
//! components. The three engines are pure functions over ordered sequences of
//! [`ComponentRecord`]s; they never fail and never perform I/O.
//!
//! ## Core Modules
//!
//! - **[`model`]**: [`ComponentRecord`] and the version normalizer
//!   ([`normalize`]) that turns free-form version strings into comparable
//!   integer tuples.
//! - **[`diff`]**: [`classify`] labels every component of two snapshots as
//!   `IDENTICAL`, `NEW`, `OBSOLETE`, `MAJOR_UPDATE` or `MINOR_UPDATE`.
//! - **[`merge`]**: order-preserving union and deduplication by
//!   `(name, version)`.
//! - **[`granularity`]**: replaces fine-grained packages by a canonical coarse
//!   component according to a [`RuleTable`].
//!
//! Around them, [`bom`] reads and writes CycloneDX JSON, [`config`] handles
//! YAML configuration, [`reports`] renders diff results and [`pipeline`] and
//! [`cli`] wire everything into the command-line tool.
//!
//! ## Diffing Two Snapshots
//!
//! ```
//! use bom_reconciler::{classify, ComponentRecord, DiffResultKind};
//!
//! let old = vec![ComponentRecord::new("AbrarJahin.DiffMatchPatch", "0.1.0")];
//! let new = vec![ComponentRecord::new("AbrarJahin.DiffMatchPatch", "9.1.0")];
//!
//! let diff = classify(&old, &new);
//! assert_eq!(diff.diff_entries[0].result, DiffResultKind::MajorUpdate);
//! assert_eq!(diff.diff_entries[0].version_old.as_deref(), Some("0.1.0"));
//! ```
//!
//! ## Merging Files
//!
//! ```no_run
//! use std::path::Path;
//! use bom_reconciler::bom::{read_bom, write_bom};
//! use bom_reconciler::merge;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let first = read_bom(Path::new("a.cdx.json"))?;
//!     let second = read_bom(Path::new("b.cdx.json"))?;
//!     write_bom(&merge(&first, &second), Path::new("merged.cdx.json"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `remote-rules` (default): download granularity rule tables over HTTP
//!   with `reqwest`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::similar_names)]

pub mod bom;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod granularity;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use diff::{classify, BomDiff, ClassificationEntry, DiffResultKind, DiffSummary};
pub use error::{ErrorContext, ReconcileError, Result};
pub use granularity::{consolidate, ConsolidationResult, GranularityRule, RuleTable};
pub use merge::{deduplicate, merge, Deduplicator};
pub use model::{normalize, ComponentKey, ComponentRecord, NormalizedVersion};
pub use reports::{ReportFormat, ReportGenerator};
