//! Granularity rule tables.
//!
//! A rule says "replace the fine-grained component X by the coarse component
//! Y". Tables are semicolon-separated with the header
//! `component_name;replacement_name;comment;source_url`.

use crate::error::{ErrorContext, ReconcileError, Result, RulesErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Header of the component name column
pub const COLUMN_COMPONENT_NAME: &str = "component_name";
/// Header of the replacement name column
pub const COLUMN_REPLACEMENT_NAME: &str = "replacement_name";
/// Header of the optional comment column
pub const COLUMN_COMMENT: &str = "comment";
/// Header of the optional source URL column
pub const COLUMN_SOURCE_URL: &str = "source_url";

/// Rule table shipped with the crate.
const BUNDLED_RULES: &str = include_str!("default_rules.csv");

/// Replace `component_name` by `replacement_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranularityRule {
    pub component_name: String,
    pub replacement_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl GranularityRule {
    pub fn new(component_name: impl Into<String>, replacement_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            replacement_name: replacement_name.into(),
            comment: None,
            source_url: None,
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}

/// Immutable, indexed set of granularity rules.
///
/// Lookups match the component name exactly but case-insensitively. When the
/// table holds several rules for the same name, the first one in table order
/// wins.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<GranularityRule>,
    index: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl RuleTable {
    /// An empty table
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// The table shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_reader(BUNDLED_RULES.as_bytes()).context("parsing bundled granularity rules")
    }

    /// Load a table from a local file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| ReconcileError::io(path, e))?;
        Self::from_reader(file).with_context(|| format!("reading {}", path.display()))
    }

    /// Parse a semicolon-separated table with a header row.
    ///
    /// The component and replacement columns are required; comment and source
    /// URL are optional. Rows that lack a component or replacement name are
    /// skipped with a warning.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let required = |name: &str| {
            position(name).ok_or_else(|| {
                ReconcileError::rules(
                    "reading header",
                    RulesErrorKind::MissingColumn(name.to_string()),
                )
            })
        };

        let name_idx = required(COLUMN_COMPONENT_NAME)?;
        let replacement_idx = required(COLUMN_REPLACEMENT_NAME)?;
        let comment_idx = position(COLUMN_COMMENT);
        let source_url_idx = position(COLUMN_SOURCE_URL);

        let mut builder = Self::builder();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            let field = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            };

            match (field(Some(name_idx)), field(Some(replacement_idx))) {
                (Some(component_name), Some(replacement_name)) => {
                    builder = builder.rule(GranularityRule {
                        component_name,
                        replacement_name,
                        comment: field(comment_idx),
                        source_url: field(source_url_idx),
                    });
                }
                _ => {
                    tracing::warn!(
                        row = row + 1,
                        "skipping granularity rule without component or replacement name"
                    );
                }
            }
        }

        Ok(builder.build())
    }

    /// First rule whose component name matches `name` case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&GranularityRule> {
        self.index
            .get(&name.to_lowercase())
            .and_then(|&idx| self.rules.get(idx))
    }

    /// Rules in table order
    #[must_use]
    pub fn rules(&self) -> &[GranularityRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Component names (lowercased) that appear in more than one rule.
    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

/// Builder for [`RuleTable`].
#[derive(Debug, Default)]
#[must_use]
pub struct RuleTableBuilder {
    rules: Vec<GranularityRule>,
}

impl RuleTableBuilder {
    /// Append a rule
    pub fn rule(mut self, rule: GranularityRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append rules in order
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = GranularityRule>,
    {
        self.rules.extend(rules);
        self
    }

    /// Index the rules. Ambiguous names are reported once each and resolved
    /// in favor of the earliest rule.
    pub fn build(self) -> RuleTable {
        let mut index = HashMap::with_capacity(self.rules.len());
        let mut duplicates: Vec<String> = Vec::new();

        for (idx, rule) in self.rules.iter().enumerate() {
            let key = rule.component_name.to_lowercase();
            match index.get(&key).copied() {
                Some(first) => {
                    if !duplicates.contains(&key) {
                        let kept: &GranularityRule = &self.rules[first];
                        tracing::warn!(
                            component = %rule.component_name,
                            kept = %kept.replacement_name,
                            ignored = %rule.replacement_name,
                            "ambiguous granularity rule table: using the first rule for this component"
                        );
                        duplicates.push(key);
                    }
                }
                None => {
                    index.insert(key, idx);
                }
            }
        }

        RuleTable {
            rules: self.rules,
            index,
            duplicates,
        }
    }
}
