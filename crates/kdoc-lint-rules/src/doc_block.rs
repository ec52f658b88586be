//! KDoc block validation.
//!
//! A block either matches its [`ExpectedDocGrammar`] completely or it does
//! not; a failing block yields one issue no matter how many clauses are
//! wrong. The clause the matcher stopped at is logged for debugging.

use crate::doc_grammar::{DocClause, ExpectedDocGrammar, MIN_TAG_TEXT};
use crate::issue::{Issue, IssueKind, IssueSink};
use kdoc_lint_core::FunctionInfo;
use tracing::debug;

/// Where a block stopped matching its grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocMismatch {
    /// Clause that was expected.
    pub expected: DocClause,
    /// Block line (0-indexed) where it was expected.
    pub line: usize,
}

/// Validates the KDoc attached to `function` against its signature.
///
/// Emits [`IssueKind::DocBlockMissing`] when there is no KDoc and
/// [`IssueKind::DocBlockMismatch`] when it does not match; at most one
/// issue per call.
pub fn validate_doc_block(function: &FunctionInfo, sink: &mut IssueSink) -> bool {
    let grammar = ExpectedDocGrammar::for_function(function);
    let Some(doc) = &function.doc else {
        sink.push(
            Issue::new(IssueKind::DocBlockMissing)
                .with_detail(format!("for function {}", function.name))
                .with_example(grammar.skeleton()),
        );
        return false;
    };

    match match_doc_block(&grammar, &doc.text) {
        Ok(()) => true,
        Err(mismatch) => {
            debug!(
                function = %function.name,
                expected = %mismatch.expected,
                line = mismatch.line,
                "KDoc rejected"
            );
            sink.push(
                Issue::new(IssueKind::DocBlockMismatch)
                    .with_detail(format!("for function {}", function.name))
                    .with_example(grammar.skeleton()),
            );
            false
        }
    }
}

/// Matches `text` against `grammar`, anchored at both ends.
///
/// # Errors
///
/// Returns the first clause that could not be matched.
pub fn match_doc_block(grammar: &ExpectedDocGrammar, text: &str) -> Result<(), DocMismatch> {
    let lines: Vec<&str> = text.lines().collect();
    let mut pos = 0;

    for clause in grammar.clauses() {
        let fail = || DocMismatch {
            expected: clause.clone(),
            line: pos,
        };
        let line = lines.get(pos).copied();
        match clause {
            DocClause::Start => {
                if line.map(str::trim_end) != Some("/**") {
                    return Err(fail());
                }
                pos += 1;
            }
            DocClause::Description => {
                let taken = count_free_lines(&lines[pos..]);
                if taken == 0 {
                    return Err(fail());
                }
                pos += taken;
            }
            DocClause::Param(name) => {
                if !line.and_then(star_text).is_some_and(|t| is_param_line(t, name)) {
                    return Err(fail());
                }
                pos += 1;
                pos += count_free_lines(&lines[pos..]);
            }
            DocClause::Return(ty) => {
                if !tag_line(line, " @return ", ty) {
                    return Err(fail());
                }
                pos += 1;
            }
            DocClause::Throws => {
                if !tag_line(line, " @throws", "") {
                    return Err(fail());
                }
                pos += 1;
            }
            DocClause::Catch => {
                if !tag_line(line, " @catch ", "") {
                    return Err(fail());
                }
                pos += 1;
            }
            DocClause::End => {
                if !line.is_some_and(is_end_line) || pos + 1 != lines.len() {
                    return Err(fail());
                }
                pos += 1;
            }
        }
    }
    Ok(())
}

/// Text after the leading `*` of a KDoc line; `None` for the end marker or
/// lines without a star.
fn star_text(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('*')?;
    (!rest.starts_with('/')).then_some(rest)
}

fn is_end_line(line: &str) -> bool {
    line.trim() == "*/"
}

/// Number of leading star lines without a tag.
fn count_free_lines(lines: &[&str]) -> usize {
    lines
        .iter()
        .take_while(|l| star_text(l).is_some_and(|t| !t.contains('@')))
        .count()
}

fn is_param_line(text: &str, name: &str) -> bool {
    let Some(after) = text
        .strip_prefix(" @param ")
        .and_then(|t| t.strip_prefix(name))
    else {
        return false;
    };
    let boundary = after
        .chars()
        .next()
        .is_some_and(|c| !(c.is_alphanumeric() || c == '_'));
    boundary && after.chars().count() >= MIN_TAG_TEXT
}

fn tag_line(line: Option<&str>, tag: &str, literal: &str) -> bool {
    line.and_then(star_text)
        .and_then(|t| t.strip_prefix(tag))
        .and_then(|t| t.strip_prefix(literal))
        .is_some_and(|rest| rest.chars().count() >= MIN_TAG_TEXT)
}
