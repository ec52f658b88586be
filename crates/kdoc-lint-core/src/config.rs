//! `kdoc-lint.toml` configuration.
//!
//! ```toml
//! preset = "recommended"
//! fail_on = "warning"
//!
//! [analyzer]
//! exclude = ["**/build/**"]
//!
//! [rules.file-header]
//! organization = "Acme Widgets"
//! ```
//!
//! Every `[rules.<name>]` table accepts `enabled` and `severity`; all other
//! keys are rule options read through [`RuleConfig`]. Tables for rules
//! nobody asks about are ignored.

use crate::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rule preset name (`recommended`, `strict` or `minimal`).
    #[serde(default)]
    pub preset: Option<String>,

    /// Lowest severity that fails a run; error when unset.
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule tables keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Severity at which a run counts as failed.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }

    /// Whether `rule_name` runs; rules without a table are enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .and_then(|c| c.enabled)
            .unwrap_or(true)
    }

    /// Severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// The table for a rule, or an empty one.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> RuleConfig {
        self.rules.get(rule_name).cloned().unwrap_or_default()
    }

    /// Names of rules whose table sets `enabled = true`, sorted.
    #[must_use]
    pub fn explicitly_enabled(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rules
            .iter()
            .filter(|(_, rc)| rc.enabled == Some(true))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

/// The `[analyzer]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Abort the run on the first file the extractor cannot parse.
    #[serde(default)]
    pub fail_on_parse_error: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_excludes(),
            respect_gitignore: true,
            fail_on_parse_error: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Gradle output and cache directories.
fn default_excludes() -> Vec<String> {
    vec!["**/build/**".to_string(), "**/.gradle/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// One `[rules.<name>]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a non-negative integer option; `None` when absent, negative or
    /// not an integer.
    #[must_use]
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_opt_str(key).unwrap_or(default)
    }

    /// Gets a string option, `None` when absent or not a string.
    #[must_use]
    pub fn get_opt_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(toml::Value::as_str)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The TOML is invalid or does not fit the schema.
    #[error("Failed to parse config{}: {source}", in_file(.path.as_deref()))]
    Parse {
        /// File the text came from, if any.
        path: Option<PathBuf>,
        /// Deserializer error.
        source: toml::de::Error,
    },
}

fn in_file(path: Option<&Path>) -> String {
    path.map(|p| format!(" {}", p.display())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(!config.analyzer.fail_on_parse_error);
        assert_eq!(config.analyzer.exclude, vec!["**/build/**", "**/.gradle/**"]);
        assert!(config.rules.is_empty());
        assert!(config.is_rule_enabled("file-header"));
        assert_eq!(config.fail_threshold(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[analyzer]
root = "./app/src"
exclude = ["**/generated/**"]
fail_on_parse_error = true

[rules.file-header]
severity = "warning"
organization = "Acme"
attribute_clauses = true

[rules.too-many-functions]
enabled = true
max_functions = 4

[rules.forbidden-log-call]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_threshold(), Severity::Warning);
        assert_eq!(config.analyzer.root, PathBuf::from("./app/src"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert!(config.analyzer.fail_on_parse_error);
        assert_eq!(config.rule_severity("file-header"), Some(Severity::Warning));
        assert!(!config.is_rule_enabled("forbidden-log-call"));
        assert_eq!(config.explicitly_enabled(), vec!["too-many-functions"]);

        let header = config.rule_config("file-header");
        assert_eq!(header.get_opt_str("organization"), Some("Acme"));
        assert!(header.get_bool("attribute_clauses", false));
        assert_eq!(
            config
                .rule_config("too-many-functions")
                .get_usize("max_functions"),
            Some(4)
        );
    }

    #[test]
    fn test_missing_and_negative_options() {
        let config = Config::parse("[rules.too-many-functions]\nmax_functions = -1\n").unwrap();
        assert_eq!(
            config
                .rule_config("too-many-functions")
                .get_usize("max_functions"),
            None
        );
        let rule = config.rule_config("function-doc");
        assert_eq!(rule.get_str("wrapper", "TLog"), "TLog");
        assert_eq!(rule.get_opt_str("organization"), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Config::parse("preset = [").unwrap_err(),
            ConfigError::Parse { path: None, .. }
        ));
        assert!(Config::parse("fail_on = \"fatal\"\n").is_err());
    }

    #[test]
    fn test_from_file_names_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("kdoc-lint.toml");
        std::fs::write(&path, "fail_on = 3\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("kdoc-lint.toml"));

        let missing = Config::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
