//! Per-function KDoc grammar.
//!
//! The expected block is an ordered list of [`DocClause`]s built from the
//! function's signature by [`DocGrammarBuilder`]. The order is fixed:
//! description, parameters, return, throws, catches.

use kdoc_lint_core::FunctionInfo;
use std::fmt;

/// Minimum characters that must follow a tag's fixed part.
pub const MIN_TAG_TEXT: usize = 10;

/// One structural clause of a KDoc block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocClause {
    /// `/**`
    Start,
    /// One or more free-text lines without tags.
    Description,
    /// `* @param <name> ...` plus continuation lines.
    Param(String),
    /// `* @return <type> ...`
    Return(String),
    /// `* @throws ...`
    Throws,
    /// `* @catch ...`
    Catch,
    /// `*/`
    End,
}

impl fmt::Display for DocClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("block start \"/**\""),
            Self::Description => f.write_str("description"),
            Self::Param(name) => write!(f, "@param {name}"),
            Self::Return(ty) => write!(f, "@return {ty}"),
            Self::Throws => f.write_str("@throws"),
            Self::Catch => f.write_str("@catch"),
            Self::End => f.write_str("block end \"*/\""),
        }
    }
}

/// Expected KDoc structure for one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedDocGrammar {
    clauses: Vec<DocClause>,
}

impl ExpectedDocGrammar {
    /// Builds the grammar for `function`.
    #[must_use]
    pub fn for_function(function: &FunctionInfo) -> Self {
        let sites = scan_sites(&function.body_children);
        let mut builder = DocGrammarBuilder::new().add_parameters(&function.params);
        if function.has_non_unit_return() {
            builder = builder.add_return(function.return_type.as_deref().unwrap_or_default());
        }
        builder
            .add_throws(sites.throws)
            .add_catches(sites.catches)
            .build()
    }

    /// Clauses in match order, markers included.
    #[must_use]
    pub fn clauses(&self) -> &[DocClause] {
        &self.clauses
    }

    /// Number of `@param` clauses.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.count(|c| matches!(c, DocClause::Param(_)))
    }

    /// Whether a `@return` clause is required.
    #[must_use]
    pub fn requires_return(&self) -> bool {
        self.count(|c| matches!(c, DocClause::Return(_))) > 0
    }

    /// Number of `@throws` clauses.
    #[must_use]
    pub fn throws_count(&self) -> usize {
        self.count(|c| *c == DocClause::Throws)
    }

    /// Number of `@catch` clauses.
    #[must_use]
    pub fn catch_count(&self) -> usize {
        self.count(|c| *c == DocClause::Catch)
    }

    fn count(&self, pred: impl Fn(&DocClause) -> bool) -> usize {
        self.clauses.iter().filter(|c| pred(c)).count()
    }

    /// A minimal block that satisfies this grammar's shape, with
    /// placeholders for the free text.
    #[must_use]
    pub fn skeleton(&self) -> String {
        self.clauses
            .iter()
            .map(|clause| match clause {
                DocClause::Start => "/**".to_string(),
                DocClause::Description => " * <description>".to_string(),
                DocClause::Param(name) => format!(" * @param {name} <description>"),
                DocClause::Return(ty) => format!(" * @return {ty} <description>"),
                DocClause::Throws => " * @throws <exception> <description>".to_string(),
                DocClause::Catch => " * @catch <exception> <description>".to_string(),
                DocClause::End => " */".to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Incrementally composes an [`ExpectedDocGrammar`].
///
/// Clauses may be added in any order; [`build`](Self::build) always emits
/// them in the fixed block order.
#[derive(Debug, Clone, Default)]
pub struct DocGrammarBuilder {
    params: Vec<String>,
    return_type: Option<String>,
    throws: usize,
    catches: usize,
}

impl DocGrammarBuilder {
    /// Creates a builder for a function with no parameters, no return
    /// value and no throw or catch sites.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one `@param` clause per name, in order.
    #[must_use]
    pub fn add_parameters<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.params
            .extend(names.iter().map(|n| n.as_ref().to_string()));
        self
    }

    /// Requires a `@return` clause naming `return_type` literally.
    #[must_use]
    pub fn add_return(mut self, return_type: &str) -> Self {
        self.return_type = Some(return_type.trim().to_string());
        self
    }

    /// Requires `count` more `@throws` clauses.
    #[must_use]
    pub fn add_throws(mut self, count: usize) -> Self {
        self.throws += count;
        self
    }

    /// Requires `count` more `@catch` clauses.
    #[must_use]
    pub fn add_catches(mut self, count: usize) -> Self {
        self.catches += count;
        self
    }

    /// Finishes the grammar.
    #[must_use]
    pub fn build(self) -> ExpectedDocGrammar {
        let mut clauses = vec![DocClause::Start, DocClause::Description];
        clauses.extend(self.params.into_iter().map(DocClause::Param));
        clauses.extend(self.return_type.map(DocClause::Return));
        clauses.extend(std::iter::repeat(DocClause::Throws).take(self.throws));
        clauses.extend(std::iter::repeat(DocClause::Catch).take(self.catches));
        clauses.push(DocClause::End);

        let grammar = ExpectedDocGrammar { clauses };
        tracing::debug!(
            params = grammar.param_count(),
            returns = grammar.requires_return(),
            throws = grammar.throws_count(),
            catches = grammar.catch_count(),
            "built doc grammar"
        );
        grammar
    }
}

/// Throw and catch sites among a body's direct children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteCounts {
    /// Children containing `throw `.
    pub throws: usize,
    /// Children containing `catch`.
    pub catches: usize,
}

/// Counts throw and catch sites by plain text search over `children`.
///
/// Only direct children are seen: a `throw` nested inside an `if` branch is
/// found only because the whole `if` is one child's text, and a child with
/// two nested throws still counts once. Comments mentioning either word are
/// counted too.
#[must_use]
pub fn scan_sites<S: AsRef<str>>(children: &[S]) -> SiteCounts {
    children
        .iter()
        .fold(SiteCounts::default(), |mut counts, child| {
            let child = child.as_ref();
            if child.contains("throw ") {
                counts.throws += 1;
            }
            if child.contains("catch") {
                counts.catches += 1;
            }
            counts
        })
}
