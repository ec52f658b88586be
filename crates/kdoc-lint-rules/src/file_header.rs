//! Rule requiring a well-formed file header (TOFIB).
//!
//! # Expected Header
//!
//! ```text
//! /**
//!  * Copyright Acme Widgets, Inc. 2018-2020. All rights reserved.
//!  * Main.kt
//!  * At least twenty characters describing the file.
//!  * @author First Last Feb 28, 2018
//!  */
//! ```
//!
//! The file-name line must name the file itself. With `attribute_clauses`
//! enabled a malformed header additionally gets one issue per broken
//! clause.

use crate::grammar::HeaderGrammar;
use crate::header::HeaderValidator;
use crate::issue::IssueSink;
use kdoc_lint_core::{Config, FileAnalysis, FileContext, Location, Rule, Severity, Violation};

/// Rule code for file-header.
pub const CODE: &str = "TOFIB";

/// Rule name for file-header.
pub const NAME: &str = "file-header";

const FILE_NAME_LINE: usize = 2;

/// Requires every file to start with a TOFIB header.
#[derive(Debug, Clone)]
pub struct FileHeader {
    validator: HeaderValidator,
    attribute_clauses: bool,
    /// Severity level.
    pub severity: Severity,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHeader {
    /// Creates a new rule accepting any organization.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validator: HeaderValidator::default(),
            attribute_clauses: false,
            severity: Severity::Error,
        }
    }

    /// Creates the rule from the `[rules.file-header]` table.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let rule_config = config.rule_config(NAME);
        let mut rule = Self::new().attribute_clauses(rule_config.get_bool("attribute_clauses", false));
        if let Some(org) = rule_config.get_opt_str("organization") {
            rule = rule.organization(org);
        }
        rule
    }

    /// Pins the organization named on the update line.
    #[must_use]
    pub fn organization(mut self, organization: &str) -> Self {
        self.validator = HeaderValidator::new(HeaderGrammar::new(Some(organization)));
        self
    }

    /// Also reports each broken clause when the header is malformed.
    #[must_use]
    pub fn attribute_clauses(mut self, enabled: bool) -> Self {
        self.attribute_clauses = enabled;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn collect(&self, text: &str, class_name: &str) -> IssueSink {
        let mut sink = IssueSink::new();
        if !self.validator.validate_header(text, &mut sink) {
            if self.attribute_clauses {
                self.validator.attribute_clauses(text, class_name, &mut sink);
            }
            return sink;
        }

        // Structure is fine; the file-name line must still name this file.
        if let Ok(layout) = self.validator.parse_header(text) {
            if let Some(issue) = self.validator.file_name_issue(layout.file_name_line, class_name) {
                sink.push(issue.at_line(FILE_NAME_LINE));
                return sink;
            }
        }
        if let Some(record) = self.validator.read_header(text, &mut sink) {
            tracing::debug!(?record, "header accepted");
        }
        sink
    }
}

impl Rule for FileHeader {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a copyright, file-name, description and author header"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, analysis: &FileAnalysis) -> Vec<Violation> {
        let location = match &analysis.header {
            Some(header) => Location::new(ctx.path.to_path_buf(), header.span.line, header.span.column)
                .with_span(header.span.offset, header.span.length),
            None => Location::new(ctx.path.to_path_buf(), 1, 1),
        };

        self.collect(analysis.header_text(), ctx.file_stem())
            .into_issues()
            .into_iter()
            .map(|issue| ctx.span_labels(issue.into_violation(NAME, self.severity, location.clone())))
            .collect()
    }
}
