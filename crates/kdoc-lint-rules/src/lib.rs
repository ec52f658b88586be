//! # kdoc-lint-rules
//!
//! Built-in rules for kdoc-lint and the validation engine behind them.
//!
//! The engine is split into a grammar registry for header lines
//! ([`grammar`]), the header validator and value extractors ([`header`]),
//! the per-function KDoc grammar builder ([`doc_grammar`]) and the KDoc
//! matcher ([`doc_block`]). Failed checks are reported as [`Issue`]s and
//! turned into violations by the rules.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | TOFIB | `file-header` | Copyright, file-name, description and author header |
//! | TOFUB | `function-doc` | KDoc matching each function's signature |
//! | LOG001 | `forbidden-log-call` | Forbids direct `android.util.Log` calls |
//! | FUN001 | `too-many-functions` | Limits function declarations per file |
//!
//! ## Usage
//!
//! ```ignore
//! use kdoc_lint_core::Analyzer;
//! use kdoc_lint_rules::{FileHeader, FunctionDoc};
//! use kdoc_lint_ts::KotlinExtractor;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./app/src")
//!     .extractor(KotlinExtractor::new())
//!     .rule(FileHeader::new().organization("Acme Widgets"))
//!     .rule(FunctionDoc::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod doc_block;
pub mod doc_grammar;
pub mod grammar;
pub mod header;
pub mod issue;

mod file_header;
mod forbidden_log_call;
mod function_doc;
mod presets;
mod too_many_functions;

pub use doc_block::{match_doc_block, validate_doc_block, DocMismatch};
pub use doc_grammar::{scan_sites, DocClause, DocGrammarBuilder, ExpectedDocGrammar, SiteCounts};
pub use file_header::FileHeader;
pub use forbidden_log_call::{is_forbidden_log_callee, ForbiddenLogCall};
pub use function_doc::FunctionDoc;
pub use grammar::HeaderGrammar;
pub use header::{
    parse_author_name, parse_creation_date, parse_year_range, HeaderClause, HeaderRecord,
    HeaderValidator, YearRange,
};
pub use issue::{Issue, IssueKind, IssueSink};
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_by_name, rules_from_config, strict_rules,
    Preset,
};
pub use too_many_functions::TooManyFunctions;

/// Re-export core types for convenience.
pub use kdoc_lint_core::{Rule, Severity, Violation};
