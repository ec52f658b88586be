//! File-header validation and value extraction.
//!
//! [`HeaderValidator::validate_header`] is the gate: a line-oriented
//! descent over the clause sequence
//!
//! ```text
//! start, update, file-name, description+, author, end
//! ```
//!
//! that reports a single [`IssueKind::HeaderMalformed`] naming the clause it
//! was expecting. The `check_*` methods validate one clause in isolation and
//! exist to attribute a failure to a specific line when a caller wants
//! finer-grained diagnostics.

use crate::grammar::{HeaderGrammar, CREATION_DATE, FIRST_LAST_NAME, YEAR_SPAN};
use crate::issue::{Issue, IssueKind, IssueSink};
use tracing::debug;

/// Minimum number of lines a header must have.
pub const MIN_HEADER_LINES: usize = 5;

/// Index of the first description line.
pub const DESCRIPTION_START: usize = 3;

/// Distance from the line count to the last description line.
pub const DESCRIPTION_END_FROM_BOTTOM: usize = 3;

/// Structured fields of a validated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    /// First copyright year.
    pub creation_year: String,
    /// Last update year, when the span has one.
    pub updated_year: Option<String>,
    /// File name including `.kt`.
    pub file_name: String,
    /// Description lines joined with a single space.
    pub description: String,
    /// Author's first and last name.
    pub author: String,
    /// Creation date as written (`Feb 28, 2018`).
    pub creation_date: String,
}

/// Creation and optional update year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRange {
    /// First year of the span.
    pub creation_year: String,
    /// Second year of the span, if any.
    pub updated_year: Option<String>,
}

/// Clause the header parser was expecting when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClause {
    /// `/**`
    Start,
    /// Copyright line.
    UpdateLine,
    /// ` * Name.kt`
    FileName,
    /// Free-text description.
    Description,
    /// `@author` line.
    Author,
    /// ` */`
    End,
}

impl std::fmt::Display for HeaderClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Start => "block start \"/**\"",
            Self::UpdateLine => "copyright update line",
            Self::FileName => "file-name line",
            Self::Description => "description line",
            Self::Author => "@author line",
            Self::End => "block end \" */\"",
        })
    }
}

/// Where the header parser stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderParseError {
    /// Clause that was expected.
    pub expected: HeaderClause,
    /// Header line (0-indexed) where it was expected.
    pub line: usize,
}

/// Line ranges of a structurally valid header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout<'a> {
    /// Update line text.
    pub update_line: &'a str,
    /// File-name line text.
    pub file_name_line: &'a str,
    /// Description line texts.
    pub description_lines: Vec<&'a str>,
    /// Author line text.
    pub author_line: &'a str,
}

struct HeaderParser<'g, 'a> {
    grammar: &'g HeaderGrammar,
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> HeaderParser<'_, 'a> {
    fn expect(
        &mut self,
        clause: HeaderClause,
        matches: impl Fn(&HeaderGrammar, &str) -> bool,
    ) -> Result<&'a str, HeaderParseError> {
        let error = HeaderParseError {
            expected: clause,
            line: self.pos,
        };
        let line = *self.lines.get(self.pos).ok_or(error)?;
        if !matches(self.grammar, line) {
            return Err(error);
        }
        self.pos += 1;
        Ok(line)
    }

    fn parse(mut self) -> Result<HeaderLayout<'a>, HeaderParseError> {
        self.expect(HeaderClause::Start, HeaderGrammar::is_block_start)?;
        let update_line = self.expect(HeaderClause::UpdateLine, HeaderGrammar::is_update_line)?;
        let file_name_line = self.expect(HeaderClause::FileName, HeaderGrammar::is_file_name_line)?;

        // Description lines are only bounded by what follows them: the
        // author line must sit directly above the end marker.
        let end = self.end_marker()?;
        let author_at = end.saturating_sub(1).max(self.pos);

        let mut description_lines = Vec::new();
        while self.pos < author_at {
            description_lines.push(
                self.expect(HeaderClause::Description, HeaderGrammar::is_description_line)?,
            );
        }
        if description_lines.is_empty() {
            let line = self.lines[self.pos];
            let expected = if self.pos < end && !self.grammar.is_author_line(line) {
                HeaderClause::Author
            } else {
                HeaderClause::Description
            };
            return Err(HeaderParseError {
                expected,
                line: self.pos,
            });
        }

        let author_line = self.expect(HeaderClause::Author, HeaderGrammar::is_author_line)?;
        self.expect(HeaderClause::End, HeaderGrammar::is_block_end)?;
        if self.lines[self.pos..].iter().any(|l| !l.trim().is_empty()) {
            return Err(HeaderParseError {
                expected: HeaderClause::End,
                line: self.pos,
            });
        }

        Ok(HeaderLayout {
            update_line,
            file_name_line,
            description_lines,
            author_line,
        })
    }

    /// Index of the first end marker after the current position.
    fn end_marker(&self) -> Result<usize, HeaderParseError> {
        self.lines[self.pos..]
            .iter()
            .position(|l| self.grammar.is_block_end(l))
            .map(|i| i + self.pos)
            .ok_or(HeaderParseError {
                expected: HeaderClause::End,
                line: self.lines.len().saturating_sub(1),
            })
    }
}

/// Validates file headers against a [`HeaderGrammar`].
#[derive(Debug, Clone, Default)]
pub struct HeaderValidator {
    grammar: HeaderGrammar,
}

impl HeaderValidator {
    /// Creates a validator for `grammar`.
    #[must_use]
    pub fn new(grammar: HeaderGrammar) -> Self {
        Self { grammar }
    }

    /// The grammar in use.
    #[must_use]
    pub fn grammar(&self) -> &HeaderGrammar {
        &self.grammar
    }

    /// Parses `text` into its clause lines without reporting anything.
    ///
    /// # Errors
    ///
    /// Returns the clause expected at the line where parsing stopped.
    pub fn parse_header<'a>(&self, text: &'a str) -> Result<HeaderLayout<'a>, HeaderParseError> {
        HeaderParser {
            grammar: &self.grammar,
            lines: text.lines().collect(),
            pos: 0,
        }
        .parse()
    }

    /// Whether `text` is a complete, well-formed header.
    ///
    /// On failure exactly one [`IssueKind::HeaderMalformed`] is emitted.
    pub fn validate_header(&self, text: &str, sink: &mut IssueSink) -> bool {
        match self.parse_header(text) {
            Ok(_) => true,
            Err(err) => {
                debug!(expected = %err.expected, line = err.line, "header rejected");
                sink.push(
                    Issue::new(IssueKind::HeaderMalformed)
                        .at_line(err.line)
                        .with_detail(format!(
                            "expected {} on header line {}",
                            err.expected,
                            err.line + 1
                        )),
                );
                false
            }
        }
    }

    fn update_issue(&self, line: &str) -> Option<Issue> {
        (!self.grammar.is_update_line(line)).then(|| {
            Issue::new(IssueKind::UpdateLine).with_example(self.grammar.example_update_line())
        })
    }

    pub(crate) fn file_name_issue(&self, line: &str, class_name: &str) -> Option<Issue> {
        (!self.grammar.is_file_name_for(line, class_name)).then(|| {
            Issue::new(IssueKind::FileName)
                .with_detail(format!("expected \"{class_name}.kt\""))
                .with_example(format!(" * {class_name}.kt"))
        })
    }

    fn author_issue(&self, line: &str) -> Option<Issue> {
        (!self.grammar.is_author_line(line)).then(|| Issue::new(IssueKind::Author))
    }

    /// Checks the copyright update line.
    pub fn check_update_line(&self, line: &str, sink: &mut IssueSink) -> bool {
        report(self.update_issue(line), None, sink)
    }

    /// Checks that the file-name line names exactly `class_name`.
    pub fn check_file_name(&self, line: &str, class_name: &str, sink: &mut IssueSink) -> bool {
        report(self.file_name_issue(line, class_name), None, sink)
    }

    /// Checks one description line.
    pub fn check_description_line(&self, line: &str, sink: &mut IssueSink) -> bool {
        if self.grammar.is_description_line(line) {
            return true;
        }
        sink.push(Issue::new(IssueKind::Description));
        false
    }

    /// Checks every line between the file-name and author lines.
    ///
    /// A header shorter than [`MIN_HEADER_LINES`] fails without looking at
    /// its content. Checking stops at the first invalid line.
    pub fn check_description_block(&self, text: &str, sink: &mut IssueSink) -> bool {
        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() < MIN_HEADER_LINES {
            sink.push(Issue::new(IssueKind::TooFewLines));
            return false;
        }

        let last = lines.len() - DESCRIPTION_END_FROM_BOTTOM;
        for (index, line) in lines
            .iter()
            .enumerate()
            .take(last + 1)
            .skip(DESCRIPTION_START)
        {
            if !self.grammar.is_description_line(line) {
                sink.push(Issue::new(IssueKind::Description).at_line(index));
                return false;
            }
        }
        true
    }

    /// Checks the author line.
    pub fn check_author_line(&self, line: &str, sink: &mut IssueSink) -> bool {
        report(self.author_issue(line), None, sink)
    }

    /// Runs every per-clause check against the positional lines of `text`.
    ///
    /// Used after [`validate_header`](Self::validate_header) failed to say
    /// which clauses are wrong. Each failing clause emits its own issue,
    /// tagged with its header line; returns whether all clauses passed.
    /// Trailing blank lines are ignored.
    pub fn attribute_clauses(&self, text: &str, class_name: &str, sink: &mut IssueSink) -> bool {
        let mut lines: Vec<&str> = text.split('\n').collect();
        while lines.len() > 1 && lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() < MIN_HEADER_LINES {
            sink.push(Issue::new(IssueKind::TooFewLines));
            return false;
        }
        let author_at = lines.len() - 2;

        let update = report(self.update_issue(lines[1]), Some(1), sink);
        let file_name = report(self.file_name_issue(lines[2], class_name), Some(2), sink);
        let description = self.check_description_block(&lines.join("\n"), sink);
        let author = report(self.author_issue(lines[author_at]), Some(author_at), sink);
        update && file_name && description && author
    }

    /// Validates `text` and, only if it is well formed, extracts its fields.
    ///
    /// Extractors never run on a malformed header, so a malformed header
    /// yields exactly the one issue from [`validate_header`](Self::validate_header).
    pub fn read_header(&self, text: &str, sink: &mut IssueSink) -> Option<HeaderRecord> {
        if !self.validate_header(text, sink) {
            return None;
        }
        let layout = self.parse_header(text).ok()?;

        let years = parse_year_range(layout.update_line, sink)?;
        let author = parse_author_name(author_name_part(layout.author_line), sink)?;
        let creation_date = parse_creation_date(layout.author_line, sink)?;
        let file_name = layout
            .file_name_line
            .trim_end()
            .trim_start_matches(" * ")
            .to_string();
        let description = layout
            .description_lines
            .iter()
            .map(|l| l.trim_start_matches(" *").trim())
            .collect::<Vec<_>>()
            .join(" ");

        Some(HeaderRecord {
            creation_year: years.creation_year,
            updated_year: years.updated_year,
            file_name,
            description,
            author,
            creation_date,
        })
    }
}

/// Pushes `issue` (if any) at `line`; returns whether there was none.
fn report(issue: Option<Issue>, line: Option<usize>, sink: &mut IssueSink) -> bool {
    match issue {
        None => true,
        Some(issue) => {
            sink.push(match line {
                Some(line) => issue.at_line(line),
                None => issue,
            });
            false
        }
    }
}

/// Text of an author line after `@author`.
fn author_name_part(line: &str) -> &str {
    line.split_once("@author").map_or(line, |(_, rest)| rest)
}

/// Reads the year span out of an update line.
///
/// `"2018"` yields only a creation year, `"2018-2020"` both years. Emits
/// [`IssueKind::YearRange`] when no span is present.
pub fn parse_year_range(text: &str, sink: &mut IssueSink) -> Option<YearRange> {
    let Some(caps) = YEAR_SPAN.captures(text) else {
        sink.push(Issue::new(IssueKind::YearRange));
        return None;
    };
    Some(YearRange {
        creation_year: caps["from"].to_string(),
        updated_year: caps.name("to").map(|m| m.as_str().to_string()),
    })
}

/// Reads the capitalized first and last name out of `text`.
///
/// Emits [`IssueKind::Author`] when no name is present.
pub fn parse_author_name(text: &str, sink: &mut IssueSink) -> Option<String> {
    if let Some(m) = FIRST_LAST_NAME.find(text) {
        return Some(m.as_str().to_string());
    }
    sink.push(Issue::new(IssueKind::Author).with_detail("no author name"));
    None
}

/// Reads a `Mon D, YYYY` date out of `text`.
///
/// Emits [`IssueKind::CreationDate`] for any other format.
pub fn parse_creation_date(text: &str, sink: &mut IssueSink) -> Option<String> {
    if let Some(m) = CREATION_DATE.find(text) {
        return Some(m.as_str().to_string());
    }
    sink.push(Issue::new(IssueKind::CreationDate));
    None
}
