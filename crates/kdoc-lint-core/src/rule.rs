//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::extractor::FileAnalysis;
use crate::types::{Severity, Violation};

/// A per-file lint rule working on the extracted [`FileAnalysis`].
///
/// # Example
///
/// ```ignore
/// use kdoc_lint_core::{FileAnalysis, FileContext, Rule, Violation};
///
/// pub struct NoEmptyFiles;
///
/// impl Rule for NoEmptyFiles {
///     fn name(&self) -> &'static str { "no-empty-files" }
///     fn code(&self) -> &'static str { "X001" }
///
///     fn check(&self, ctx: &FileContext, analysis: &FileAnalysis) -> Vec<Violation> {
///         // inspect analysis.functions, analysis.header, ...
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "file-header").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "TOFIB").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext, analysis: &FileAnalysis) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
