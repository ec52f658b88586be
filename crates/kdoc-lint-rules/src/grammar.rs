//! Clause grammars for file headers.
//!
//! Each structural line of a header has one pattern here. Patterns are
//! compiled once per process and never change; anything that varies per
//! project (organization) or per file (class name) is captured by the
//! pattern and compared literally by [`HeaderGrammar`].
//!
//! ```text
//! /**
//!  * Copyright Acme Widgets, Inc. 2018-2020. All rights reserved.
//!  * Main.kt
//!  * At least twenty characters of description, any number of lines.
//!  * @author First Last Feb 28, 2018
//!  */
//! ```

use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid header grammar {pattern}: {e}"))
}

/// `/**` with no leading whitespace.
pub static BLOCK_START: LazyLock<Regex> = LazyLock::new(|| compile(r"^/\*\*\s*$"));

/// Whitespace, then `*/`.
pub static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s+\*/\s*$"));

/// ` * Copyright <Org>, Inc. <YYYY>[-<YYYY>]. All rights reserved.`
pub static UPDATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^ \* Copyright (?P<org>[A-Z][^,]*), Inc\. (?P<years>[0-9]{4}(?:-[0-9]{4})?)\. All rights reserved\.\s*$",
    )
});

/// ` * <Name>.kt`
pub static FILE_NAME_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^ \* (?P<name>.+)\.kt\s*$"));

/// ` * ` followed by at least 20 characters.
pub static DESCRIPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^ \* (?P<text>.{20,})$"));

/// ` * @author <First> <Last> <Mon> <D|DD>, <YYYY>`
pub static AUTHOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^ \* @author [A-Z][a-z]+ [A-Z][a-z]+ [A-Z][a-z]{2} [0-9]{1,2}, [0-9]{4}\s*$")
});

/// `YYYY` or `YYYY-YYYY`, no whitespace around the hyphen.
pub static YEAR_SPAN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?P<from>[0-9]{4})(?:-(?P<to>[0-9]{4}))?"));

/// Capitalized first and last name.
pub static FIRST_LAST_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[A-Z][a-z]+ ?[A-Z][a-z]+"));

/// `Mon D, YYYY` or `Mon DD, YYYY`.
pub static CREATION_DATE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[A-Z][a-z]{2} [0-9]{1,2}, [0-9]{4}"));

/// Header grammar bound to one organization.
///
/// Without an organization any capitalized name without a comma is
/// accepted on the update line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderGrammar {
    organization: Option<String>,
}

impl HeaderGrammar {
    /// Creates a grammar, optionally pinned to `organization`.
    #[must_use]
    pub fn new(organization: Option<&str>) -> Self {
        Self {
            organization: organization.map(str::to_owned),
        }
    }

    /// Configured organization, if any.
    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Whether `line` is the block start marker.
    #[must_use]
    pub fn is_block_start(&self, line: &str) -> bool {
        BLOCK_START.is_match(line)
    }

    /// Whether `line` is the block end marker.
    #[must_use]
    pub fn is_block_end(&self, line: &str) -> bool {
        BLOCK_END.is_match(line)
    }

    /// Whether `line` is a valid update line for this organization.
    #[must_use]
    pub fn is_update_line(&self, line: &str) -> bool {
        UPDATE_LINE.captures(line).is_some_and(|caps| {
            self.organization
                .as_deref()
                .map_or(true, |org| &caps["org"] == org)
        })
    }

    /// Whether `line` is a file-name line, for any name.
    #[must_use]
    pub fn is_file_name_line(&self, line: &str) -> bool {
        FILE_NAME_LINE.is_match(line)
    }

    /// Whether `line` names exactly `class_name` (case-sensitive).
    #[must_use]
    pub fn is_file_name_for(&self, line: &str, class_name: &str) -> bool {
        FILE_NAME_LINE
            .captures(line)
            .is_some_and(|caps| &caps["name"] == class_name)
    }

    /// Whether `line` is a description line.
    #[must_use]
    pub fn is_description_line(&self, line: &str) -> bool {
        DESCRIPTION_LINE.is_match(line)
    }

    /// Whether `line` is an author line.
    #[must_use]
    pub fn is_author_line(&self, line: &str) -> bool {
        AUTHOR_LINE.is_match(line)
    }

    /// The update line this grammar expects, for suggestions.
    #[must_use]
    pub fn example_update_line(&self) -> String {
        format!(
            " * Copyright {}, Inc. 2018-2020. All rights reserved.",
            self.organization.as_deref().unwrap_or("Organization")
        )
    }
}
