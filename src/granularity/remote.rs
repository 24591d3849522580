//! Remote granularity rule tables.

use super::RuleTable;
use crate::error::{ReconcileError, Result, RulesErrorKind};
use std::time::Duration;

/// Default timeout for downloading a rule table
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(feature = "remote-rules")]
fn remote_error(msg: &str, err: reqwest::Error) -> ReconcileError {
    ReconcileError::rules(msg, RulesErrorKind::Remote(err.to_string()))
}

/// Download and parse a rule table.
#[cfg(feature = "remote-rules")]
pub fn fetch_rule_table(url: &str, timeout: Duration) -> Result<RuleTable> {
    use crate::error::ErrorContext;

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .map_err(|e| remote_error("Failed to create HTTP client", e))?;

    tracing::debug!(url, "downloading granularity rules");
    let response = client
        .get(url)
        .send()
        .map_err(|e| remote_error("Failed to send request", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReconcileError::rules(
            format!("GET {url}"),
            RulesErrorKind::Remote(format!("server returned status {}", status.as_u16())),
        ));
    }

    let body = response
        .text()
        .map_err(|e| remote_error("Failed to read response body", e))?;

    RuleTable::from_reader(body.as_bytes()).with_context(|| format!("parsing rules from {url}"))
}

/// Download and parse a rule table.
#[cfg(not(feature = "remote-rules"))]
pub fn fetch_rule_table(url: &str, _timeout: Duration) -> Result<RuleTable> {
    Err(ReconcileError::rules(
        "loading remote rules",
        RulesErrorKind::RemoteUnsupported(url.to_string()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_host_is_an_error() {
        // Port 9 on localhost is the discard service and is closed almost everywhere.
        let result = fetch_rule_table("http://127.0.0.1:9/rules.csv", Duration::from_millis(500));
        assert!(matches!(result, Err(ReconcileError::Rules { .. })));
    }
}
