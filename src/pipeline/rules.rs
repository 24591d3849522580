//! Granularity rule table resolution.

use crate::config::GranularityConfig;
use crate::granularity::{fetch_rule_table, RuleTable};
use anyhow::{Context, Result};
use std::time::Duration;

/// Build the rule table selected by the configuration.
///
/// A local file wins over a URL; with neither, the bundled table is used
/// unless disabled, in which case the table is empty.
pub fn load_rule_table(config: &GranularityConfig) -> Result<RuleTable> {
    let table = if let Some(path) = &config.rules_file {
        RuleTable::from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?
    } else if let Some(url) = &config.rules_url {
        fetch_rule_table(url, Duration::from_secs(config.timeout_secs))
            .with_context(|| format!("Failed to download rules from {url}"))?
    } else if config.use_bundled_rules {
        RuleTable::bundled().context("Failed to load bundled rules")?
    } else {
        RuleTable::empty()
    };

    tracing::info!(rules = table.len(), "granularity rules loaded");
    Ok(table)
}
