//! Consolidation of over-granular BOM entries.
//!
//! Some ecosystems publish one framework as many packages (`@angular/core`,
//! `@angular/router`, ...). A [`RuleTable`] maps those fine-grained names to
//! one canonical component and [`consolidate`] applies it, collapsing the
//! duplicates that result.
//!
//! Rule tables are explicit values: each call receives its own table, built
//! from the bundled default, a local file or a remote URL.
//!
//! ```
//! use bom_reconciler::granularity::{consolidate, GranularityRule, RuleTable};
//! use bom_reconciler::model::ComponentRecord;
//!
//! let rules = RuleTable::builder()
//!     .rule(GranularityRule::new("@angular/animations", "Angular"))
//!     .rule(GranularityRule::new("@angular/router", "Angular"))
//!     .build();
//!
//! let records = vec![
//!     ComponentRecord::new("@angular/animations", "15.2.6"),
//!     ComponentRecord::new("@angular/router", "15.2.6"),
//! ];
//!
//! let result = consolidate(&records, &rules);
//! assert_eq!(result.records, vec![ComponentRecord::new("Angular", "15.2.6")]);
//! assert_eq!(result.reduction_count, 1);
//! ```

mod engine;
pub mod remote;
mod rules;

pub use engine::{consolidate, ConsolidationResult, Substitution};
pub use remote::fetch_rule_table;
pub use rules::{
    GranularityRule, RuleTable, RuleTableBuilder, COLUMN_COMMENT, COLUMN_COMPONENT_NAME,
    COLUMN_REPLACEMENT_NAME, COLUMN_SOURCE_URL,
};
