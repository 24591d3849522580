//! Classification of the delta between two BOM snapshots.
//!
//! Every component of an old and a new list ends up in exactly one place:
//! the equal set (same name and version in both) or one diff entry
//! (`NEW`, `OBSOLETE`, `MAJOR_UPDATE`, `MINOR_UPDATE`).
//!
//! # Example
//!
//! ```
//! use bom_reconciler::diff::{classify, DiffResultKind};
//! use bom_reconciler::model::ComponentRecord;
//!
//! let old = vec![ComponentRecord::new("certifi", "2022.12.7")];
//! let new = vec![ComponentRecord::new("certifi", "2022.12.99")];
//!
//! let diff = classify(&old, &new);
//! assert_eq!(diff.diff_entries[0].result, DiffResultKind::MinorUpdate);
//! assert_eq!(diff.diff_entries[0].version_old.as_deref(), Some("2022.12.7"));
//! ```

mod engine;
mod result;

pub use engine::classify;
pub use result::{BomDiff, ClassificationEntry, DiffResultKind, DiffSummary};
