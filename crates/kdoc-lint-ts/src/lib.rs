//! # kdoc-lint-ts
//!
//! Tree-sitter based Kotlin extractor for kdoc-lint.
//!
//! [`KotlinExtractor`] implements [`kdoc_lint_core::LanguageExtractor`]:
//! it parses a `.kt`/`.kts` file and hands the rules the file header, every
//! function declaration with its signature, body children and KDoc, and
//! every call expression.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod kotlin;

pub use kotlin::KotlinExtractor;
