//! Granularity consolidation engine.

use super::{GranularityRule, RuleTable};
use crate::merge::Deduplicator;
use crate::model::{attributes, ComponentRecord};
use packageurl::PackageUrl;
use serde::Serialize;
use std::str::FromStr;

/// One replacement performed during consolidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    /// Original component name
    pub from: String,
    /// Replacement component name
    pub to: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Output of [`consolidate`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ConsolidationResult {
    /// Consolidated records, unique by `(name, version)`, in input order
    pub records: Vec<ComponentRecord>,
    /// Every replacement that was applied, in input order
    pub substitutions: Vec<Substitution>,
    /// `len(input) - len(records)`
    pub reduction_count: usize,
}

/// Replace fine-grained components by their coarse counterparts and collapse
/// the duplicates this creates.
///
/// Records without a matching rule pass through unchanged. The rule table is
/// only read.
pub fn consolidate(records: &[ComponentRecord], rules: &RuleTable) -> ConsolidationResult {
    let mut dedup = Deduplicator::new();
    let mut substitutions = Vec::new();

    for record in records {
        match rules.find(&record.name) {
            Some(rule) => {
                let replacement = substitute(record, rule);
                tracing::debug!(
                    from = %record.name,
                    to = %replacement.name,
                    version = %record.version,
                    "replacing component by coarser one"
                );
                substitutions.push(Substitution {
                    from: record.name.clone(),
                    to: replacement.name.clone(),
                    version: record.version.clone(),
                    comment: rule.comment.clone(),
                });
                dedup.push(replacement);
            }
            None => {
                dedup.push(record.clone());
            }
        }
    }

    let reduction_count = records.len() - dedup.len();
    ConsolidationResult {
        records: dedup.into_records(),
        substitutions,
        reduction_count,
    }
}

/// Build the replacement record for `record` under `rule`.
///
/// The version is kept; the package URL is rebuilt for the new name with the
/// same package type; `source-url` is taken from the rule when it has one.
fn substitute(record: &ComponentRecord, rule: &GranularityRule) -> ComponentRecord {
    let mut attrs = record.attributes.clone();
    if let Some(url) = &rule.source_url {
        attrs.insert(attributes::SOURCE_URL.to_string(), url.clone());
    }

    ComponentRecord {
        name: rule.replacement_name.clone(),
        version: record.version.clone(),
        identifier: record
            .identifier
            .as_deref()
            .and_then(|purl| rebuild_identifier(purl, &rule.replacement_name, &record.version)),
        attributes: attrs,
    }
}

fn rebuild_identifier(purl: &str, name: &str, version: &str) -> Option<String> {
    let parsed = match PackageUrl::from_str(purl) {
        Ok(purl) => purl,
        Err(e) => {
            tracing::debug!(identifier = purl, error = %e, "identifier is not a package URL");
            return None;
        }
    };

    let mut rebuilt = PackageUrl::new(parsed.ty().to_string(), name.to_string()).ok()?;
    if !version.is_empty() {
        rebuilt.with_version(version.to_string());
    }
    Some(rebuilt.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, version: &str) -> ComponentRecord {
        ComponentRecord::new(name, version)
    }

    fn angular_rules() -> RuleTable {
        RuleTable::builder()
            .rule(
                GranularityRule::new("@angular/animations", "Angular")
                    .with_source_url("https://github.com/angular/angular"),
            )
            .rule(GranularityRule::new("@angular/router", "Angular"))
            .build()
    }

    #[test]
    fn test_collapses_to_single_record() {
        let records = vec![
            rec("@angular/animations", "15.2.6"),
            rec("@angular/router", "15.2.6"),
        ];
        let result = consolidate(&records, &angular_rules());

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name, "Angular");
        assert_eq!(result.records[0].version, "15.2.6");
        assert_eq!(result.reduction_count, 1);
        assert_eq!(result.substitutions.len(), 2);
    }

    #[test]
    fn test_unmatched_records_pass_through() {
        let records = vec![
            rec("rxjs", "7.8.0").with_identifier("pkg:npm/rxjs@7.8.0"),
            rec("@angular/router", "15.2.6"),
            rec("zone.js", "0.13.0"),
        ];
        let result = consolidate(&records, &angular_rules());

        assert_eq!(result.records[0], records[0]);
        assert_eq!(result.records[1].name, "Angular");
        assert_eq!(result.records[2], records[2]);
        assert_eq!(result.reduction_count, 0);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let result = consolidate(&[rec("@Angular/Router", "15.2.6")], &angular_rules());
        assert_eq!(result.records[0].name, "Angular");
    }

    #[test]
    fn test_different_versions_are_kept_apart() {
        let records = vec![
            rec("@angular/animations", "15.2.6"),
            rec("@angular/router", "15.2.7"),
        ];
        let result = consolidate(&records, &angular_rules());
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.reduction_count, 0);
    }

    #[test]
    fn test_source_url_overwritten_or_kept() {
        let records = vec![
            rec("@angular/animations", "15.2.6")
                .with_attribute(attributes::SOURCE_URL, "https://registry.npmjs.org/a.tgz")
                .with_attribute(attributes::LANGUAGE, "JavaScript"),
            rec("@angular/router", "15.2.7")
                .with_attribute(attributes::SOURCE_URL, "https://registry.npmjs.org/r.tgz"),
        ];
        let result = consolidate(&records, &angular_rules());

        assert_eq!(
            result.records[0].source_url(),
            Some("https://github.com/angular/angular")
        );
        assert_eq!(
            result.records[0].attribute(attributes::LANGUAGE),
            Some("JavaScript")
        );
        assert_eq!(
            result.records[1].source_url(),
            Some("https://registry.npmjs.org/r.tgz")
        );
    }

    #[test]
    fn test_identifier_rebuilt_with_same_type() {
        let records = vec![rec("@angular/router", "15.2.6")
            .with_identifier("pkg:npm/%40angular/router@15.2.6")];
        let result = consolidate(&records, &angular_rules());

        let identifier = result.records[0]
            .identifier
            .as_deref()
            .expect("identifier should be rebuilt");
        let purl = PackageUrl::from_str(identifier).expect("valid purl");
        assert_eq!(purl.ty(), "npm");
        assert_eq!(purl.version(), Some("15.2.6"));
        assert!(purl.namespace().is_none());
    }

    #[test]
    fn test_missing_or_invalid_identifier_stays_empty() {
        let records = vec![
            rec("@angular/router", "15.2.6"),
            rec("@angular/animations", "15.2.7").with_identifier("not a purl"),
        ];
        let result = consolidate(&records, &angular_rules());
        assert!(result.records.iter().all(|r| r.identifier.is_none()));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![rec("@angular/router", "15.2.6")];
        let before = records.clone();
        let _ = consolidate(&records, &angular_rules());
        assert_eq!(records, before);
    }

    #[test]
    fn test_empty_table_still_deduplicates() {
        let records = vec![rec("a", "1"), rec("a", "1"), rec("b", "1")];
        let result = consolidate(&records, &RuleTable::empty());
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.reduction_count, 1);
        assert!(result.substitutions.is_empty());
    }

    #[test]
    fn test_first_rule_wins_on_collision() {
        let rules = RuleTable::builder()
            .rule(GranularityRule::new("spring-core", "Spring Framework"))
            .rule(GranularityRule::new("Spring-Core", "Spring"))
            .build();
        let result = consolidate(&[rec("spring-core", "6.0.9")], &rules);
        assert_eq!(result.records[0].name, "Spring Framework");
    }
}
