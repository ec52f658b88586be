//! Core types for lint violations and results.

use miette::{Diagnostic, LabeledSpan, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A secondary location attached to a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Location of the label.
    pub location: Location,
    /// Message for this label.
    pub message: String,
}

impl Label {
    /// Creates a new label.
    #[must_use]
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

/// A suggested fix for a violation.
///
/// Header and KDoc rules use this to carry a corrective example of the
/// clause that failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Issue code (e.g., "TOFIB001").
    pub code: String,
    /// Rule name (e.g., "file-header").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Corrective example, if any.
    pub suggestion: Option<Suggestion>,
    /// Lines inside the reported block the issue points at.
    pub labels: Vec<Label>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
            labels: Vec::new(),
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Adds a label to this violation.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Multi-line rendering for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = vec![
            format!("{} {} at {}", self.code, self.rule, self.location),
            format!("  {}: {}", self.severity, self.message),
        ];
        lines.extend(
            self.labels
                .iter()
                .map(|l| format!("  = note: line {}: {}", l.location.line, l.message)),
        );
        lines.extend(
            self.suggestion
                .iter()
                .map(|s| format!("  = help: {}", s.message)),
        );
        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location, self.severity, self.code, self.message
        )
    }
}

/// A [`Violation`] as a miette diagnostic.
///
/// The primary span is labelled with the rule name; labels that carry a
/// byte span become secondary labels.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    code: String,
    message: String,
    severity: Severity,
    help: Option<String>,
    span: SourceSpan,
    rule: String,
    notes: Vec<(String, SourceSpan)>,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            code: v.code.clone(),
            message: v.message.clone(),
            severity: v.severity,
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            rule: v.rule.clone(),
            notes: v
                .labels
                .iter()
                .filter(|l| l.location.length > 0)
                .map(|l| {
                    (
                        l.message.clone(),
                        SourceSpan::from((l.location.offset, l.location.length)),
                    )
                })
                .collect(),
        }
    }
}

impl Diagnostic for ViolationDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code) as Box<dyn fmt::Display + 'a>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Info => miette::Severity::Advice,
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let primary = LabeledSpan::new_with_span(Some(self.rule.clone()), self.span);
        let notes = self
            .notes
            .iter()
            .map(|(message, span)| LabeledSpan::new_with_span(Some(message.clone()), *span));
        Some(Box::new(std::iter::once(primary).chain(notes)))
    }
}

/// Violation counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    /// Error-level violations.
    pub errors: usize,
    /// Warning-level violations.
    pub warnings: usize,
    /// Info-level violations.
    pub infos: usize,
}

impl fmt::Display for SeverityCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s), {} info(s)",
            self.errors, self.warnings, self.infos
        )
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn counts(&self) -> SeverityCounts {
        self.violations
            .iter()
            .fold(SeverityCounts::default(), |mut counts, v| {
                match v.severity {
                    Severity::Error => counts.errors += 1,
                    Severity::Warning => counts.warnings += 1,
                    Severity::Info => counts.infos += 1,
                }
                counts
            })
    }

    /// Whether any violation reaches `severity`.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Sorts violations by file, then line, then column.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            (&a.location.file, a.location.line, a.location.column).cmp(&(
                &b.location.file,
                b.location.line,
                b.location.column,
            ))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "TOFIB001",
            "file-header",
            severity,
            Location::new(PathBuf::from("app/src/Main.kt"), 1, 1),
            "File header does not match the expected structure",
        )
    }

    #[test]
    fn violation_display_is_single_line() {
        let v = make_violation(Severity::Warning);
        insta::assert_snapshot!(
            v.to_string(),
            @"app/src/Main.kt:1:1: warning [TOFIB001] File header does not match the expected structure"
        );
    }

    #[test]
    fn violation_format_includes_suggestion_and_labels() {
        let v = make_violation(Severity::Error)
            .with_suggestion(Suggestion::new("Ex: \" * Main.kt\""))
            .with_label(Label::new(
                Location::new(PathBuf::from("app/src/Main.kt"), 3, 1),
                "expected file-name line",
            ));
        let formatted = v.format();
        assert!(formatted.starts_with("TOFIB001 file-header at app/src/Main.kt:1:1"));
        assert!(formatted.contains("= note: line 3: expected file-name line"));
        assert!(formatted.contains("= help: Ex: \" * Main.kt\""));
    }

    #[test]
    fn violation_format_omits_help_when_none() {
        let formatted = make_violation(Severity::Error).format();
        assert!(!formatted.contains("help:"));
    }

    #[test]
    fn diagnostic_carries_code_severity_and_spans() {
        let mut v = make_violation(Severity::Warning);
        v.location = v.location.clone().with_span(4, 10);
        let v = v
            .with_label(Label::new(
                Location::new(PathBuf::from("app/src/Main.kt"), 3, 1).with_span(40, 12),
                "file-name line expected here",
            ))
            .with_label(Label::new(
                Location::new(PathBuf::from("app/src/Main.kt"), 4, 1),
                "no span",
            ));
        let diag = ViolationDiagnostic::from(&v);
        assert_eq!(
            diag.to_string(),
            "File header does not match the expected structure"
        );
        assert_eq!(diag.code().map(|c| c.to_string()), Some("TOFIB001".to_string()));
        assert_eq!(diag.severity(), Some(miette::Severity::Warning));
        let spans: Vec<(usize, usize)> = diag
            .labels()
            .into_iter()
            .flatten()
            .map(|l| (l.offset(), l.len()))
            .collect();
        assert_eq!(spans, vec![(4, 10), (40, 12)]);
    }

    #[test]
    fn has_violations_at_threshold() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
        assert!(result.has_violations_at(Severity::Info));
    }

    #[test]
    fn counts_split_levels() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        result.violations.push(make_violation(Severity::Error));
        result.violations.push(make_violation(Severity::Error));
        let counts = result.counts();
        assert_eq!(
            counts,
            SeverityCounts {
                errors: 2,
                warnings: 1,
                infos: 0
            }
        );
        assert_eq!(counts.to_string(), "2 error(s), 1 warning(s), 0 info(s)");
    }

    #[test]
    fn sort_orders_by_file_then_line() {
        let mut result = LintResult::new();
        let at = |file: &str, line| {
            Violation::new(
                "X",
                "x",
                Severity::Info,
                Location::new(PathBuf::from(file), line, 1),
                "m",
            )
        };
        result.violations.push(at("b.kt", 1));
        result.violations.push(at("a.kt", 9));
        result.violations.push(at("a.kt", 2));
        result.sort();
        let order: Vec<(String, usize)> = result
            .violations
            .iter()
            .map(|v| (v.location.file.display().to_string(), v.location.line))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.kt".to_string(), 2),
                ("a.kt".to_string(), 9),
                ("b.kt".to_string(), 1)
            ]
        );
    }
}
