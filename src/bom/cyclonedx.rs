//! CycloneDX JSON document structures and their mapping to component records.
//!
//! Only the parts of the schema that carry component identity and provenance
//! are modelled; everything else is ignored on input.

use crate::model::{attributes, ComponentRecord};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub(crate) const BOM_FORMAT: &str = "CycloneDX";
pub(crate) const SPEC_VERSION: &str = "1.6";

/// External reference comment marking a source archive download
pub const SOURCE_URL_COMMENT: &str = "source archive (download location)";
/// External reference comment marking a binary download
pub const BINARY_URL_COMMENT: &str = "binary (download location)";
/// Property carrying the primary programming language
pub const LANGUAGE_PROPERTY: &str = "siemens:primaryLanguage";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CdxBom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", skip_deserializing)]
    pub metadata: Option<CdxMetadata>,
    #[serde(default)]
    pub components: Vec<CdxComponent>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CdxMetadata {
    pub timestamp: String,
    pub tools: CdxTools,
}

#[derive(Debug, Serialize)]
pub(crate) struct CdxTools {
    pub components: Vec<CdxTool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CdxTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CdxComponent {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(rename = "bom-ref", default, skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<CdxLicenseChoice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashes: Vec<CdxHash>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<CdxExternalReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<CdxProperty>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CdxLicenseChoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<CdxLicense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CdxLicense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CdxHash {
    pub alg: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CdxExternalReference {
    #[serde(rename = "type")]
    pub ref_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CdxProperty {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl CdxLicenseChoice {
    fn text(&self) -> Option<&str> {
        self.expression.as_deref().or_else(|| {
            self.license
                .as_ref()
                .and_then(|l| l.id.as_deref().or(l.name.as_deref()))
        })
    }
}

/// Keep the first value for `key`; later ones are logged and dropped.
fn insert_first(
    attrs: &mut IndexMap<String, String>,
    component: &str,
    key: String,
    value: String,
) {
    match attrs.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(slot) => {
            tracing::debug!(
                component,
                attribute = %slot.key(),
                kept = %slot.get(),
                dropped = %value,
                "duplicate attribute value dropped"
            );
        }
    }
}

/// Attribute key for an external reference.
fn external_reference_key(reference: &CdxExternalReference) -> String {
    match (reference.ref_type.as_str(), reference.comment.as_deref()) {
        ("distribution", Some(SOURCE_URL_COMMENT)) => attributes::SOURCE_URL.to_string(),
        ("distribution", Some(BINARY_URL_COMMENT)) => attributes::BINARY_URL.to_string(),
        ("website", _) => attributes::WEBSITE.to_string(),
        ("vcs", _) => attributes::VCS.to_string(),
        (other, _) => format!("{}{other}", attributes::EXTERNAL_PREFIX),
    }
}

impl CdxComponent {
    /// Convert to a record. `name` must already be validated.
    pub(crate) fn into_record(self, name: String) -> ComponentRecord {
        let mut record = ComponentRecord::new(name, self.version.unwrap_or_default());
        record.identifier = self.purl.filter(|p| !p.is_empty());

        let attrs = &mut record.attributes;
        if let Some(group) = self.group.filter(|g| !g.is_empty()) {
            attrs.insert(attributes::GROUP.to_string(), group);
        }
        if let Some(description) = self.description {
            attrs.insert(attributes::DESCRIPTION.to_string(), description);
        }

        let licenses: Vec<&str> = self.licenses.iter().filter_map(CdxLicenseChoice::text).collect();
        if !licenses.is_empty() {
            attrs.insert(attributes::LICENSE.to_string(), licenses.join(" AND "));
        }

        for hash in self.hashes {
            let key = format!("{}{}", attributes::HASH_PREFIX, hash.alg);
            insert_first(attrs, &record.name, key, hash.content);
        }
        for reference in self.external_references {
            let key = external_reference_key(&reference);
            if key.starts_with(attributes::EXTERNAL_PREFIX) {
                if let Some(comment) = &reference.comment {
                    tracing::debug!(
                        component = %record.name,
                        url = %reference.url,
                        comment = %comment,
                        "external reference comment not kept"
                    );
                }
            }
            insert_first(attrs, &record.name, key, reference.url);
        }
        for property in self.properties {
            let key = if property.name == LANGUAGE_PROPERTY {
                attributes::LANGUAGE.to_string()
            } else {
                property.name
            };
            insert_first(attrs, &record.name, key, property.value);
        }

        record
    }

    /// Convert a record back into a CycloneDX component.
    pub(crate) fn from_record(record: &ComponentRecord) -> Self {
        let mut component = Self {
            component_type: Some("library".to_string()),
            bom_ref: Some(
                record
                    .identifier
                    .clone()
                    .unwrap_or_else(|| format!("{}-{}", record.name, record.version)),
            ),
            name: Some(record.name.clone()),
            version: Some(record.version.clone()),
            purl: record.identifier.clone(),
            ..Self::default()
        };

        for (key, value) in &record.attributes {
            let value = value.clone();
            match key.as_str() {
                attributes::GROUP => component.group = Some(value),
                attributes::DESCRIPTION => component.description = Some(value),
                attributes::LICENSE => component.licenses.push(CdxLicenseChoice {
                    license: None,
                    expression: Some(value),
                }),
                attributes::SOURCE_URL => component.external_references.push(reference(
                    "distribution",
                    value,
                    Some(SOURCE_URL_COMMENT),
                )),
                attributes::BINARY_URL => component.external_references.push(reference(
                    "distribution",
                    value,
                    Some(BINARY_URL_COMMENT),
                )),
                attributes::WEBSITE => {
                    component.external_references.push(reference("website", value, None));
                }
                attributes::VCS => {
                    component.external_references.push(reference("vcs", value, None));
                }
                attributes::LANGUAGE => component.properties.push(CdxProperty {
                    name: LANGUAGE_PROPERTY.to_string(),
                    value,
                }),
                other => {
                    if let Some(alg) = other.strip_prefix(attributes::HASH_PREFIX) {
                        component.hashes.push(CdxHash {
                            alg: alg.to_string(),
                            content: value,
                        });
                    } else if let Some(ref_type) = other.strip_prefix(attributes::EXTERNAL_PREFIX) {
                        component.external_references.push(reference(ref_type, value, None));
                    } else {
                        component.properties.push(CdxProperty {
                            name: other.to_string(),
                            value,
                        });
                    }
                }
            }
        }

        component
    }
}

fn reference(ref_type: &str, url: String, comment: Option<&str>) -> CdxExternalReference {
    CdxExternalReference {
        ref_type: ref_type.to_string(),
        url,
        comment: comment.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_reference_keys() {
        let src = reference("distribution", "u".into(), Some(SOURCE_URL_COMMENT));
        let bin = reference("distribution", "u".into(), Some(BINARY_URL_COMMENT));
        let other = reference("distribution", "u".into(), Some("mirror"));
        let tracker = reference("issue-tracker", "u".into(), None);

        assert_eq!(external_reference_key(&src), attributes::SOURCE_URL);
        assert_eq!(external_reference_key(&bin), attributes::BINARY_URL);
        assert_eq!(external_reference_key(&other), "external:distribution");
        assert_eq!(external_reference_key(&tracker), "external:issue-tracker");
    }

    #[test]
    fn test_record_attributes_map_back() {
        let record = ComponentRecord::new("requests", "2.31.0")
            .with_identifier("pkg:pypi/requests@2.31.0")
            .with_attribute(attributes::SOURCE_URL, "https://files.example/requests.tar.gz")
            .with_attribute(attributes::LANGUAGE, "Python")
            .with_attribute("hash:SHA-256", "abc123")
            .with_attribute("external:issue-tracker", "https://github.com/psf/requests/issues")
            .with_attribute("custom:note", "reviewed");

        let component = CdxComponent::from_record(&record);
        assert_eq!(component.bom_ref.as_deref(), Some("pkg:pypi/requests@2.31.0"));
        assert_eq!(component.hashes.len(), 1);
        assert_eq!(component.external_references.len(), 2);
        assert_eq!(
            component.external_references[0].comment.as_deref(),
            Some(SOURCE_URL_COMMENT)
        );
        assert_eq!(component.properties.len(), 2);
        assert_eq!(component.properties[0].name, LANGUAGE_PROPERTY);

        let name = component.name.clone().unwrap_or_default();
        assert_eq!(component.into_record(name).attributes.len(), record.attributes.len());
    }

    #[test]
    fn test_bom_ref_falls_back_to_name_version() {
        let component = CdxComponent::from_record(&ComponentRecord::new("zlib", "1.3"));
        assert_eq!(component.bom_ref.as_deref(), Some("zlib-1.3"));
        assert!(component.purl.is_none());
    }

    #[test]
    fn test_first_value_wins_for_repeated_attributes() {
        let component = CdxComponent {
            name: Some("openssl".to_string()),
            hashes: vec![
                CdxHash {
                    alg: "SHA-256".to_string(),
                    content: "aaa".to_string(),
                },
                CdxHash {
                    alg: "SHA-256".to_string(),
                    content: "bbb".to_string(),
                },
            ],
            external_references: vec![
                reference("website", "https://openssl.org".into(), None),
                reference("website", "https://www.openssl.org".into(), None),
            ],
            ..CdxComponent::default()
        };

        let record = component.into_record("openssl".to_string());
        assert_eq!(record.attribute("hash:SHA-256"), Some("aaa"));
        assert_eq!(record.attribute(attributes::WEBSITE), Some("https://openssl.org"));
        assert_eq!(record.attributes.len(), 2);
    }

    #[test]
    fn test_license_choice_text() {
        let by_id = CdxLicenseChoice {
            license: Some(CdxLicense {
                id: Some("MIT".to_string()),
                name: None,
            }),
            expression: None,
        };
        let by_expr = CdxLicenseChoice {
            license: None,
            expression: Some("Apache-2.0 OR MIT".to_string()),
        };
        assert_eq!(by_id.text(), Some("MIT"));
        assert_eq!(by_expr.text(), Some("Apache-2.0 OR MIT"));
    }
}
