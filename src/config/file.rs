//! Locating, reading and layering `.bom-reconciler.yaml` files.

use super::types::{AppConfig, DEFAULT_RULES_TIMEOUT_SECS};
use crate::error::{ReconcileError, Result};
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

/// File names recognized in every search directory, most specific first.
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    ".bom-reconciler.yaml",
    ".bom-reconciler.yml",
    "bom-reconciler.yaml",
    "bom-reconciler.yml",
];

/// Directories searched for a config file, in priority order: the working
/// directory, the enclosing git checkout, the per-user config directory and
/// the home directory.
#[must_use]
pub fn search_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let git_root = cwd.as_deref().and_then(|dir| {
        dir.ancestors()
            .find(|candidate| candidate.join(".git").exists())
            .map(Path::to_path_buf)
    });

    let mut found: Vec<PathBuf> = Vec::with_capacity(4);
    for dir in [
        cwd,
        git_root,
        dirs::config_dir().map(|d| d.join("bom-reconciler")),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    {
        if !found.contains(&dir) {
            found.push(dir);
        }
    }
    found
}

/// Pick the config file to use. An explicit path wins when it exists;
/// otherwise the first recognized file in [`search_dirs`].
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }
    search_dirs().iter().find_map(|dir| config_in_dir(dir))
}

fn config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Read one YAML config file. Sections and keys left out keep their defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ReconcileError::io(path, e))?;
    serde_yaml::from_str(&content)
        .map_err(|e| ReconcileError::config(format!("{}: {e}", path.display())))
}

/// The discovered config and where it came from. A file that fails to load
/// is reported and skipped.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    let Some(path) = discover_config_file(explicit_path) else {
        return (AppConfig::default(), None);
    };
    match load_config_file(&path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            (config, Some(path))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            (AppConfig::default(), None)
        }
    }
}

impl AppConfig {
    /// Layer `other` over `self`. A value in `other` only counts as set when
    /// it differs from its default.
    pub fn merge(&mut self, other: &Self) {
        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        self.output.compact |= other.output.compact;

        self.diff.include_identical |= other.diff.include_identical;

        // rule sources replace each other instead of combining
        if other.granularity.rules_file.is_some() {
            self.granularity.rules_file.clone_from(&other.granularity.rules_file);
            self.granularity.rules_url = None;
        }
        if other.granularity.rules_url.is_some() {
            self.granularity.rules_url.clone_from(&other.granularity.rules_url);
            self.granularity.rules_file = None;
        }
        self.granularity.use_bundled_rules &= other.granularity.use_bundled_rules;
        if other.granularity.timeout_secs != DEFAULT_RULES_TIMEOUT_SECS {
            self.granularity.timeout_secs = other.granularity.timeout_secs;
        }
        if other.granularity.output_file.is_some() {
            self.granularity
                .output_file
                .clone_from(&other.granularity.output_file);
        }

        self.behavior.fail_on_change |= other.behavior.fail_on_change;
        self.behavior.quiet |= other.behavior.quiet;
    }

    /// Discovered config file with `cli_overrides` layered on top.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

/// Starter config written by `config init`; every value is the default.
#[must_use]
pub fn generate_example_config() -> String {
    r"# bom-reconciler settings. Command line flags take precedence.
#
# Looked up as .bom-reconciler.yaml (or .yml, with or without the dot) in the
# working directory, the git checkout root, ~/.config/bom-reconciler/ and ~.

output:
  # diff report: json or summary
  format: json
  # diff report destination, stdout when unset
  # file: diff.json
  # single-line JSON for diff reports and granularity output
  compact: false

diff:
  # list IDENTICAL components too
  include_identical: false

granularity:
  # rule table with columns component_name;replacement_name;comment;source_url
  # rules_file: ./granularity.csv
  # or fetch it (needs the remote-rules feature); not together with rules_file
  # rules_url: https://example.com/granularity.csv
  # without rules_file/rules_url, fall back to the built-in table
  use_bundled_rules: true
  timeout_secs: 30
  # consolidated BOM destination, stdout when unset
  # output_file: coarse.cdx.json

behavior:
  # diff exits with 1 when anything changed
  fail_on_change: false
  quiet: false
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_in_dir_prefers_dotted_yaml() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bom-reconciler.yml"), "").unwrap();
        std::fs::write(tmp.path().join(".bom-reconciler.yaml"), "").unwrap();

        assert_eq!(
            config_in_dir(tmp.path()),
            Some(tmp.path().join(".bom-reconciler.yaml"))
        );
    }

    #[test]
    fn test_config_in_dir_empty() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_search_dirs_start_with_cwd() {
        let found = search_dirs();
        assert_eq!(found.first(), std::env::current_dir().ok().as_ref());
        for (i, dir) in found.iter().enumerate() {
            assert!(!found[i + 1..].contains(dir), "{} listed twice", dir.display());
        }
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(
            &config_path,
            "output:\n  format: summary\n\
             granularity:\n  rules_url: https://example.com/rules.csv\n  timeout_secs: 5\n  output_file: coarse.cdx.json\n\
             behavior:\n  fail_on_change: true\n",
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.output.format, ReportFormat::Summary);
        assert_eq!(
            config.granularity.rules_url.as_deref(),
            Some("https://example.com/rules.csv")
        );
        assert_eq!(config.granularity.timeout_secs, 5);
        assert_eq!(
            config.granularity.output_file,
            Some(PathBuf::from("coarse.cdx.json"))
        );
        assert!(config.output.file.is_none());
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ReconcileError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_yaml_names_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "behavior: [not, a, map]\n").unwrap();

        match load_config_file(&config_path) {
            Err(ReconcileError::Config(msg)) => assert!(msg.contains("config.yaml")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .rules_file(Some(PathBuf::from("local.csv")))
            .compact(true)
            .build();
        let overrides = AppConfig::builder()
            .rules_url(Some("https://example.com/rules.csv".to_string()))
            .output_format(ReportFormat::Summary)
            .granularity_output(Some(PathBuf::from("coarse.cdx.json")))
            .quiet(true)
            .build();

        base.merge(&overrides);

        assert_eq!(base.output.format, ReportFormat::Summary);
        assert!(base.output.compact);
        assert!(base.output.file.is_none());
        assert!(base.granularity.rules_file.is_none());
        assert_eq!(
            base.granularity.rules_url.as_deref(),
            Some("https://example.com/rules.csv")
        );
        assert_eq!(
            base.granularity.output_file,
            Some(PathBuf::from("coarse.cdx.json"))
        );
        assert!(base.behavior.quiet);
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let config: AppConfig = serde_yaml::from_str(&generate_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "behavior:\n  quiet: true\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
