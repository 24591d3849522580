//! CycloneDX JSON input and output.
//!
//! Reading flattens each component into a [`ComponentRecord`]: name, version,
//! package URL and a string attribute map holding licenses, hashes, external
//! references and properties. Writing reverses the mapping, so a record read
//! from a document and written back keeps its attributes.
//!
//! [`ComponentRecord`]: crate::model::ComponentRecord

mod cyclonedx;
mod reader;
mod writer;

pub use cyclonedx::{BINARY_URL_COMMENT, LANGUAGE_PROPERTY, SOURCE_URL_COMMENT};
pub use reader::{parse_bom_str, read_bom};
pub use writer::{bom_to_string, write_bom};
