//! # kdoc-lint-core
//!
//! Core framework for the Kotlin file-header and KDoc linter.
//!
//! This crate provides the foundational traits and types the rules and the
//! language extractors plug into:
//!
//! - [`Rule`] trait for per-file rules over a [`FileAnalysis`]
//! - [`LanguageExtractor`] trait turning source text into a [`FileAnalysis`]
//! - [`Analyzer`] for file discovery and rule dispatch
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use kdoc_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./app/src")
//!     .extractor(KotlinExtractor::new())
//!     .rule(FileHeader::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod extractor;
mod rule;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use extractor::{
    CallSite, CommentBlock, ExtractError, FileAnalysis, FunctionInfo, LanguageExtractor, Span,
};
pub use rule::{Rule, RuleBox};
pub use types::{
    Label, LintResult, Location, Severity, SeverityCounts, Suggestion, Violation,
    ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
