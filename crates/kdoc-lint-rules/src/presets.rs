//! Rule presets for common configurations.

use crate::{FileHeader, ForbiddenLogCall, FunctionDoc, TooManyFunctions};
use kdoc_lint_core::{Config, RuleBox};

/// Preset configurations for kdoc-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Header, KDoc and logging rules.
    Recommended,
    /// Every rule, function count included.
    Strict,
    /// Header and KDoc rules only.
    Minimal,
}

impl Preset {
    /// Parses a preset name as written in `kdoc-lint.toml`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Rule names this preset enables.
    #[must_use]
    pub fn rule_names(self) -> &'static [&'static str] {
        match self {
            Self::Minimal => &[crate::file_header::NAME, crate::function_doc::NAME],
            Self::Recommended => &[
                crate::file_header::NAME,
                crate::function_doc::NAME,
                crate::forbidden_log_call::NAME,
            ],
            Self::Strict => &[
                crate::file_header::NAME,
                crate::function_doc::NAME,
                crate::forbidden_log_call::NAME,
                crate::too_many_functions::NAME,
            ],
        }
    }

    /// Returns the rules for this preset with default settings.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        self.rules_with(&Config::default())
    }

    /// Returns the rules for this preset, configured from `config`.
    #[must_use]
    pub fn rules_with(self, config: &Config) -> Vec<RuleBox> {
        self.rule_names()
            .iter()
            .filter_map(|name| rule_by_name(name, config))
            .collect()
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `file-header` (TOFIB) - File header structure
/// - `function-doc` (TOFUB) - KDoc on every function
/// - `forbidden-log-call` (LOG001) - No direct `android.util.Log`
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules()
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules plus:
/// - `too-many-functions` (FUN001) - Function count per file
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    Preset::Strict.rules()
}

/// Returns the minimal set of rules: the header and KDoc rules.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    Preset::Minimal.rules()
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    Preset::Strict.rules()
}

/// Builds the rule named `name` (or its code) from `config`.
#[must_use]
pub fn rule_by_name(name: &str, config: &Config) -> Option<RuleBox> {
    let rule: RuleBox = match name {
        crate::file_header::NAME | crate::file_header::CODE => {
            Box::new(FileHeader::from_config(config))
        }
        crate::function_doc::NAME | crate::function_doc::CODE => {
            Box::new(FunctionDoc::from_config(config))
        }
        crate::forbidden_log_call::NAME | crate::forbidden_log_call::CODE => {
            Box::new(ForbiddenLogCall::from_config(config))
        }
        crate::too_many_functions::NAME | crate::too_many_functions::CODE => {
            Box::new(TooManyFunctions::from_config(config))
        }
        _ => return None,
    };
    Some(rule)
}

/// Builds the rule set selected by `config`.
///
/// The preset named in the file (recommended when absent) provides the
/// base set; any rule with its own table and `enabled = true` is added on
/// top. Rules disabled in the file are dropped later by the analyzer.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown preset {name:?}, using recommended");
            Preset::Recommended
        }),
    };

    let mut rules = preset.rules_with(config);
    let extra = config
        .explicitly_enabled()
        .into_iter()
        .filter(|name| !preset.rule_names().contains(name));
    for name in extra {
        match rule_by_name(name, config) {
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(names(&minimal_rules()), vec!["file-header", "function-doc"]);
        assert_eq!(recommended_rules().len(), 3);
        assert_eq!(strict_rules().len(), 4);
        assert_eq!(all_rules().len(), 4);
    }

    #[test]
    fn test_rule_by_name_accepts_codes() {
        let config = Config::default();
        assert_eq!(rule_by_name("TOFUB", &config).map(|r| r.name()), Some("function-doc"));
        assert_eq!(rule_by_name("FUN001", &config).map(|r| r.name()), Some("too-many-functions"));
        assert!(rule_by_name("no-such-rule", &config).is_none());
    }

    #[test]
    fn test_rules_from_config() {
        let config = Config::parse(
            r#"
preset = "minimal"
[rules.too-many-functions]
enabled = true
max_functions = 5
"#,
        )
        .unwrap();
        assert_eq!(
            names(&rules_from_config(&config)),
            vec!["file-header", "function-doc", "too-many-functions"]
        );
        assert_eq!(names(&rules_from_config(&Config::default())).len(), 3);
    }
}
