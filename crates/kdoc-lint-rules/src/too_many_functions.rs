//! Rule limiting the number of functions declared in one file.
//!
//! The count comes from the file's own extraction result, so nothing is
//! carried from one file to the next.

use kdoc_lint_core::{Config, FileAnalysis, FileContext, Location, Rule, Severity, Violation};

/// Rule code for too-many-functions.
pub const CODE: &str = "FUN001";

/// Rule name for too-many-functions.
pub const NAME: &str = "too-many-functions";

const DEFAULT_MAX_FUNCTIONS: usize = 2;

/// Reports files declaring more functions than allowed.
#[derive(Debug, Clone)]
pub struct TooManyFunctions {
    /// Highest accepted function count.
    pub max_functions: usize,
    /// Severity level.
    pub severity: Severity,
}

impl Default for TooManyFunctions {
    fn default() -> Self {
        Self::new()
    }
}

impl TooManyFunctions {
    /// Creates a new rule with a threshold of two functions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_functions: DEFAULT_MAX_FUNCTIONS,
            severity: Severity::Info,
        }
    }

    /// Creates the rule from the `[rules.too-many-functions]` table.
    ///
    /// A missing or negative `max_functions` keeps the default.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let rule = Self::new();
        match config.rule_config(NAME).get_usize("max_functions") {
            Some(max) => rule.max_functions(max),
            None => rule,
        }
    }

    /// Sets the threshold.
    #[must_use]
    pub fn max_functions(mut self, max: usize) -> Self {
        self.max_functions = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for TooManyFunctions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the number of function declarations per file"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, analysis: &FileAnalysis) -> Vec<Violation> {
        let count = analysis.functions.len();
        if count <= self.max_functions {
            return Vec::new();
        }

        let file_name = ctx
            .path
            .file_name()
            .map_or_else(|| ctx.path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let line = analysis.functions.first().map_or(1, |f| f.span.line);
        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            Location::new(ctx.path.to_path_buf(), line, 1),
            format!(
                "The file {file_name} has {count} function declarations. Threshold is specified with {}.",
                self.max_functions
            ),
        )]
    }
}
