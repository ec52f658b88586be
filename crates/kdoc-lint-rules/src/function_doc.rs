//! Rule requiring a KDoc block on every function (TOFUB).
//!
//! The block must describe every parameter by name, the return type when it
//! is not `Unit`, and one `@throws`/`@catch` line per throw/catch site in
//! the function body:
//!
//! ```kotlin
//! /**
//!  * Checks whether the site change threshold has been set.
//!  * @param force skip the cached value and query the pump
//!  * @return Boolean true once a threshold is configured
//!  */
//! fun isSiteChangeSet(force: Boolean): Boolean { ... }
//! ```

use crate::doc_block::validate_doc_block;
use crate::issue::IssueSink;
use kdoc_lint_core::{Config, FileAnalysis, FileContext, Location, Rule, Severity, Violation};

/// Rule code for function-doc.
pub const CODE: &str = "TOFUB";

/// Rule name for function-doc.
pub const NAME: &str = "function-doc";

/// Requires a matching KDoc block on every function.
#[derive(Debug, Clone)]
pub struct FunctionDoc {
    /// Severity level.
    pub severity: Severity,
}

impl Default for FunctionDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionDoc {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Creates the rule from the `[rules.function-doc]` table.
    #[must_use]
    pub fn from_config(_config: &Config) -> Self {
        Self::new()
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for FunctionDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a KDoc block matching each function's signature"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, analysis: &FileAnalysis) -> Vec<Violation> {
        let mut violations = Vec::new();

        for function in &analysis.functions {
            let mut sink = IssueSink::new();
            if validate_doc_block(function, &mut sink) {
                continue;
            }

            let span = function.doc.as_ref().map_or(function.span, |doc| doc.span);
            let location = Location::new(ctx.path.to_path_buf(), span.line, span.column)
                .with_span(span.offset, span.length);
            violations.extend(
                sink.into_issues()
                    .into_iter()
                    .map(|issue| {
                        ctx.span_labels(issue.into_violation(NAME, self.severity, location.clone()))
                    }),
            );
        }

        violations
    }
}
