//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs. Each handler reads its
//! inputs, runs one engine and writes the result, returning the exit code.

mod diff;
mod granularity;
mod merge;

pub use diff::run_diff;
pub use granularity::run_granularity;
pub use merge::run_merge;
