//! Issue taxonomy shared by the header and KDoc validators.
//!
//! Validators never fail with an error: every failed check appends exactly
//! one [`Issue`] to the caller's [`IssueSink`] and returns an "invalid"
//! result. Rules turn the collected issues into [`Violation`]s.

use kdoc_lint_core::{Label, Location, Severity, Suggestion, Violation};

/// Example header shown when the whole block is malformed.
pub const EXAMPLE_HEADER: &str = "/**
 * Copyright Organization, Inc. 2018-2020. All rights reserved.
 * TestFile.kt
 * This is a test description of this file.
 * @author Mitchell Thornton Feb 28, 2018
 */";

/// Example KDoc shown when a function has none.
pub const EXAMPLE_DOC: &str = "/**
 * Describes what the function does.
 * @param name description of the parameter
 * @return Type description of the returned value
 */";

/// Category of a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// The header does not match the full header grammar.
    HeaderMalformed,
    /// The header has fewer lines than the minimum.
    TooFewLines,
    /// The copyright update line is malformed.
    UpdateLine,
    /// The file-name line is malformed or names another file.
    FileName,
    /// A description line is malformed.
    Description,
    /// The author line (or the author name in it) is malformed.
    Author,
    /// No year span could be read from the update line.
    YearRange,
    /// No creation date could be read from the author line.
    CreationDate,
    /// The function has no KDoc block.
    DocBlockMissing,
    /// The function's KDoc block does not match its signature.
    DocBlockMismatch,
}

impl IssueKind {
    /// Every kind, header issues first.
    pub const ALL: [Self; 10] = [
        Self::HeaderMalformed,
        Self::TooFewLines,
        Self::UpdateLine,
        Self::FileName,
        Self::Description,
        Self::Author,
        Self::YearRange,
        Self::CreationDate,
        Self::DocBlockMissing,
        Self::DocBlockMismatch,
    ];

    /// Stable code reported with the violation.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::HeaderMalformed => "TOFIB001",
            Self::TooFewLines => "TOFIB002",
            Self::UpdateLine => "TOFIB003",
            Self::FileName => "TOFIB004",
            Self::Description => "TOFIB005",
            Self::Author => "TOFIB006",
            Self::YearRange => "TOFIB007",
            Self::CreationDate => "TOFIB008",
            Self::DocBlockMissing => "TOFUB001",
            Self::DocBlockMismatch => "TOFUB002",
        }
    }

    /// Human-readable diagnosis.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::HeaderMalformed => "File header does not match the expected structure",
            Self::TooFewLines => "The file header does not have 5 or more lines",
            Self::UpdateLine => "Update line in file header does not match expected",
            Self::FileName => "File name does not match expected",
            Self::Description => "Description is not found or formatted properly",
            Self::Author => "@author line is not found or formatted properly",
            Self::YearRange => "Something wrong with the year-range format, please double check",
            Self::CreationDate => "Initial creation date is not found or formatted properly",
            Self::DocBlockMissing => "No KDoc block found",
            Self::DocBlockMismatch => "KDoc block does not match expected",
        }
    }

    /// Name of the clause the check covers.
    #[must_use]
    pub fn clause(self) -> &'static str {
        match self {
            Self::HeaderMalformed | Self::TooFewLines => "file header",
            Self::UpdateLine => "update line",
            Self::FileName => "file-name line",
            Self::Description => "description line",
            Self::Author => "author line",
            Self::YearRange => "year span",
            Self::CreationDate => "creation date",
            Self::DocBlockMissing | Self::DocBlockMismatch => "KDoc block",
        }
    }

    /// Corrective example for the clause.
    #[must_use]
    pub fn example(self) -> Option<&'static str> {
        match self {
            Self::HeaderMalformed | Self::TooFewLines => Some(EXAMPLE_HEADER),
            Self::UpdateLine => {
                Some(" * Copyright Organization, Inc. 2018-2020. All rights reserved.")
            }
            Self::FileName => Some(" * TestFile.kt"),
            Self::Description => Some(" * This is a test description of this file."),
            Self::Author => Some(" * @author Mitchell Thornton Feb 28, 2018"),
            Self::YearRange => Some("2018 or 2018-2020"),
            Self::CreationDate => Some("Feb 28, 2018"),
            Self::DocBlockMissing => Some(EXAMPLE_DOC),
            Self::DocBlockMismatch => None,
        }
    }
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// What failed.
    pub kind: IssueKind,
    /// Line within the checked text (0-indexed), when known.
    pub line: Option<usize>,
    /// Extra context appended to the message.
    pub detail: Option<String>,
    /// Example overriding [`IssueKind::example`].
    pub example: Option<String>,
}

impl Issue {
    /// Creates an issue of the given kind.
    #[must_use]
    pub fn new(kind: IssueKind) -> Self {
        Self {
            kind,
            line: None,
            detail: None,
            example: None,
        }
    }

    /// Records the line the issue points at.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds context to the message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Replaces the default corrective example.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Full message, detail included.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}: {detail}", self.kind.message()),
            None => self.kind.message().to_string(),
        }
    }

    /// Converts the issue into a violation anchored at `location`.
    ///
    /// `location` is the start of the checked entity; when the issue knows
    /// its line, a label points at that line.
    #[must_use]
    pub fn into_violation(self, rule: &str, severity: Severity, location: Location) -> Violation {
        let mut violation = Violation::new(
            self.kind.code(),
            rule,
            severity,
            location.clone(),
            self.message(),
        );
        if let Some(line) = self.line {
            let labelled = Location::new(location.file.clone(), location.line + line, 1);
            violation = violation.with_label(Label::new(
                labelled,
                format!("{} expected here", self.kind.clause()),
            ));
        }
        if let Some(example) = self.example.as_deref().or(self.kind.example()) {
            violation = violation.with_suggestion(Suggestion::new(format!("Ex:\n{example}")));
        }
        violation
    }
}

/// Per-call collector for issues.
#[derive(Debug, Default)]
pub struct IssueSink {
    issues: Vec<Issue>,
}

impl IssueSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an issue.
    pub fn push(&mut self, issue: Issue) {
        tracing::debug!(code = issue.kind.code(), "{}", issue.message());
        self.issues.push(issue);
    }

    /// Issues collected so far.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Kinds of the collected issues, in emission order.
    #[must_use]
    pub fn kinds(&self) -> Vec<IssueKind> {
        self.issues.iter().map(|i| i.kind).collect()
    }

    /// Number of collected issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether no issue was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consumes the sink.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
