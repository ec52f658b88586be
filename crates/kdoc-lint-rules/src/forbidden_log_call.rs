//! Rule forbidding direct `android.util.Log` calls.
//!
//! # Detected Patterns
//!
//! - `Log.v(...)`, `Log.d(...)`, `Log.i(...)`, `Log.w(...)`, `Log.e(...)`,
//!   `Log.wtf(...)`
//! - The same calls fully qualified as `android.util.Log.*`
//!
//! # Good Patterns
//!
//! ```kotlin
//! TLog.d(TAG, "connected")
//! ```
//!
//! Import directives are not calls and are never reported.

use kdoc_lint_core::{
    Config, FileAnalysis, FileContext, Location, Rule, Severity, Suggestion, Violation,
};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for forbidden-log-call.
pub const CODE: &str = "LOG001";

/// Rule name for forbidden-log-call.
pub const NAME: &str = "forbidden-log-call";

const DEFAULT_WRAPPER: &str = "TLog";

static LOG_CALLEE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:android\.util\.)?Log\.(?:v|d|i|w|e|wtf)$")
        .unwrap_or_else(|e| panic!("invalid log callee pattern: {e}"))
});

/// Forbids `android.util.Log` in favour of a logging wrapper.
#[derive(Debug, Clone)]
pub struct ForbiddenLogCall {
    /// Name of the wrapper object suggested instead.
    pub wrapper: String,
    /// Severity level.
    pub severity: Severity,
}

impl Default for ForbiddenLogCall {
    fn default() -> Self {
        Self::new()
    }
}

impl ForbiddenLogCall {
    /// Creates a new rule suggesting `TLog`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wrapper: DEFAULT_WRAPPER.to_string(),
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from the `[rules.forbidden-log-call]` table.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new().wrapper(config.rule_config(NAME).get_str("wrapper", DEFAULT_WRAPPER))
    }

    /// Sets the suggested wrapper.
    #[must_use]
    pub fn wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.wrapper = wrapper.into();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Whether `callee` is a direct `android.util.Log` call.
#[must_use]
pub fn is_forbidden_log_callee(callee: &str) -> bool {
    LOG_CALLEE.is_match(callee.trim())
}

impl Rule for ForbiddenLogCall {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids android.util.Log calls; use the logging wrapper"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, analysis: &FileAnalysis) -> Vec<Violation> {
        analysis
            .calls
            .iter()
            .filter(|call| is_forbidden_log_callee(&call.callee))
            .map(|call| {
                let method = call.callee.rsplit('.').next().unwrap_or_default();
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    Location::new(ctx.path.to_path_buf(), call.span.line, call.span.column)
                        .with_span(call.span.offset, call.span.length),
                    "android.util.Log usage is forbidden",
                )
                .with_suggestion(Suggestion::new(format!(
                    "Use {}.{method}(...) instead",
                    self.wrapper
                )))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdoc_lint_core::{CallSite, Span};
    use std::path::Path;

    fn call(callee: &str, line: usize) -> CallSite {
        CallSite {
            callee: callee.to_string(),
            span: Span {
                line,
                column: 9,
                offset: 0,
                length: callee.len(),
            },
        }
    }

    fn check(rule: &ForbiddenLogCall, calls: Vec<CallSite>) -> Vec<Violation> {
        let ctx = FileContext::new(Path::new("Pump.kt"), "", Path::new("."));
        let analysis = FileAnalysis {
            calls,
            ..FileAnalysis::default()
        };
        rule.check(&ctx, &analysis)
    }

    #[test]
    fn test_detects_log_calls() {
        let violations = check(
            &ForbiddenLogCall::new(),
            vec![
                call("Log.d", 3),
                call("android.util.Log.wtf", 4),
                call("TLog.d", 5),
                call("historyLog.typeId", 6),
                call("Log.println", 7),
            ],
        );
        let lines: Vec<_> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert_eq!(
            violations[0].suggestion.as_ref().map(|s| s.message.as_str()),
            Some("Use TLog.d(...) instead")
        );
    }

    #[test]
    fn test_custom_wrapper() {
        let config = Config::parse("[rules.forbidden-log-call]\nwrapper = \"Timber\"\n").unwrap();
        let violations = check(&ForbiddenLogCall::from_config(&config), vec![call("Log.e", 1)]);
        assert_eq!(
            violations[0].suggestion.as_ref().map(|s| s.message.as_str()),
            Some("Use Timber.e(...) instead")
        );
    }

    #[test]
    fn test_callee_pattern() {
        for callee in ["Log.v", "Log.i", "Log.w", "Log.e", " Log.d "] {
            assert!(is_forbidden_log_callee(callee), "{callee}");
        }
        for callee in ["TLog.d", "Log.dx", "MyLog.e", "Log", "log.d"] {
            assert!(!is_forbidden_log_callee(callee), "{callee}");
        }
    }
}
