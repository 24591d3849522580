//! Component records and their identity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known attribute keys.
///
/// Provenance data is stored in [`ComponentRecord::attributes`] under these
/// keys so that lookups are direct map accesses.
pub mod attributes {
    /// Download location of the source archive
    pub const SOURCE_URL: &str = "source-url";
    /// Download location of the binary artifact
    pub const BINARY_URL: &str = "binary-url";
    /// Project website
    pub const WEBSITE: &str = "website";
    /// Version control repository
    pub const VCS: &str = "vcs";
    /// Primary programming language
    pub const LANGUAGE: &str = "language";
    pub const DESCRIPTION: &str = "description";
    pub const GROUP: &str = "group";
    /// License expression
    pub const LICENSE: &str = "license";
    /// Prefix for hash values, followed by the algorithm (`hash:SHA-256`)
    pub const HASH_PREFIX: &str = "hash:";
    /// Prefix for external references without a dedicated key (`external:issue-tracker`)
    pub const EXTERNAL_PREFIX: &str = "external:";
}

/// Identity of a component: the exact, case-sensitive `(name, version)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey {
    pub name: String,
    pub version: String,
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A single entry of a bill of materials.
///
/// Only `name` and `version` take part in identity. The `identifier` (a
/// package URL) is consulted by the granularity rules, and `attributes` are
/// carried through the engines untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl ComponentRecord {
    /// Create a record with no identifier and no attributes
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            identifier: None,
            attributes: IndexMap::new(),
        }
    }

    /// Set the package URL identifier
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The identity key of this record
    #[must_use]
    pub fn key(&self) -> ComponentKey {
        ComponentKey {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    /// Look up an attribute value
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.attribute(attributes::SOURCE_URL)
    }
}

impl fmt::Display for ComponentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_identifier_and_attributes() {
        let a = ComponentRecord::new("certifi", "2022.12.7")
            .with_identifier("pkg:pypi/certifi@2022.12.7")
            .with_attribute(attributes::LANGUAGE, "Python");
        let b = ComponentRecord::new("certifi", "2022.12.7");

        assert_eq!(a.key(), b.key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let a = ComponentRecord::new("Certifi", "1.0");
        let b = ComponentRecord::new("certifi", "1.0");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_attribute_lookup() {
        let rec = ComponentRecord::new("six", "1.16.0")
            .with_attribute(attributes::SOURCE_URL, "https://example.org/six.tar.gz");
        assert_eq!(rec.source_url(), Some("https://example.org/six.tar.gz"));
        assert_eq!(rec.attribute(attributes::BINARY_URL), None);
    }

    #[test]
    fn test_key_display() {
        let rec = ComponentRecord::new("lodash", "4.17.21");
        assert_eq!(rec.key().to_string(), "lodash@4.17.21");
        assert_eq!(rec.to_string(), "lodash, 4.17.21");
    }
}
