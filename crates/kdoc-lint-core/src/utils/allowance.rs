//! Comment-based allowance directives.
//!
//! A line directive silences a rule on its own line and the line after:
//! ```text
//! // kdoc-lint: allow(function-doc) reason="generated accessor"
//! /* kdoc-lint: allow(forbidden-log-call) */
//! ```
//!
//! A file directive silences a rule for the whole file, wherever it
//! appears; generated sources carry one instead of a header:
//! ```text
//! // kdoc-lint: allow-file(file-header, function-doc) reason="protobuf output"
//! ```
//!
//! `all` matches every rule.

use std::collections::HashSet;

const DIRECTIVE_PREFIX: &str = "kdoc-lint:";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Line,
    File,
}

#[derive(Debug, Clone)]
struct AllowDirective {
    scope: Scope,
    rules: HashSet<String>,
    reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }

    fn into_check(self) -> AllowCheck {
        AllowCheck::Allowed {
            reason: self.reason,
        }
    }
}

/// Checks whether `rule_name` is allowed at `line` (1-indexed).
///
/// File directives are honoured first; then the reported line and the line
/// before it are inspected.
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    let file_wide = lines
        .iter()
        .filter_map(|l| parse_allow_directive(l))
        .find(|d| d.scope == Scope::File && d.covers(rule_name));
    if let Some(directive) = file_wide {
        return directive.into_check();
    }

    [line.saturating_sub(1), line]
        .into_iter()
        .filter(|&n| n >= 1 && n <= lines.len())
        .filter_map(|n| parse_allow_directive(lines[n - 1]))
        .find(|d| d.scope == Scope::Line && d.covers(rule_name))
        .map_or(AllowCheck::Denied, AllowDirective::into_check)
}

/// Parses a directive from the first `//` or `/*` comment on `line` that
/// carries one.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    line.match_indices('/')
        .filter(|(idx, _)| matches!(line.as_bytes().get(idx + 1), Some(b'/' | b'*')))
        .find_map(|(idx, _)| {
            let comment = line[idx..].trim_start_matches(['/', '*']);
            let comment = comment.split("*/").next().unwrap_or(comment);
            parse_comment(comment)
        })
}

fn parse_comment(comment: &str) -> Option<AllowDirective> {
    let directive = comment.trim().strip_prefix(DIRECTIVE_PREFIX)?.trim();
    let (scope, body) = match directive.strip_prefix("allow-file(") {
        Some(body) => (Scope::File, body),
        None => (Scope::Line, directive.strip_prefix("allow(")?),
    };

    let (names, rest) = body.split_once(')')?;
    let rules: HashSet<String> = names
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if rules.is_empty() {
        return None;
    }

    let reason = rest
        .trim()
        .strip_prefix("reason=")
        .and_then(|r| r.trim().strip_prefix('"'))
        .and_then(|r| r.split_once('"'))
        .map(|(reason, _)| reason.to_string())
        .filter(|r| !r.is_empty());

    Some(AllowDirective {
        scope,
        rules,
        reason,
    })
}
