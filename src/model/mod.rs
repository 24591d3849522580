//! Data model shared by the reconciliation engines.
//!
//! A BOM is handled as a plain ordered `Vec<ComponentRecord>`; ordering rules
//! are stated by each engine rather than imposed by a container.

mod component;
mod version;

pub use component::{attributes, ComponentKey, ComponentRecord};
pub use version::{normalize, NormalizedVersion, VersionDelta};
