//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the seam between syntax-tree parsing and the
//! rules: an extractor turns raw source text into a [`FileAnalysis`] and the
//! rules only ever look at that intermediate representation.

use std::path::PathBuf;

/// Source span shared by every extracted entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
}

/// A block comment (`/* ... */` or `/** ... */`) with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Raw comment text, delimiters included.
    pub text: String,
    /// Where the comment sits in the file.
    pub span: Span,
}

/// A function declaration together with its signature and attached KDoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    /// Function name.
    pub name: String,
    /// Declared parameter names, in declaration order.
    pub params: Vec<String>,
    /// Declared return type text, if the function has an explicit one.
    pub return_type: Option<String>,
    /// Text of each direct child of the function body block.
    ///
    /// Expression bodies (`fun f() = ...`) contribute the expression itself
    /// as the single child.
    pub body_children: Vec<String>,
    /// The KDoc comment directly preceding the declaration.
    pub doc: Option<CommentBlock>,
    /// Span of the declaration.
    pub span: Span,
}

impl FunctionInfo {
    /// Whether the function declares a return type other than `Unit`.
    #[must_use]
    pub fn has_non_unit_return(&self) -> bool {
        self.return_type
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty() && t.trim() != "Unit")
    }
}

/// A call expression such as `Log.d(TAG, "msg")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Callee text, e.g. `Log.d` or `android.util.Log.e`.
    pub callee: String,
    /// Span of the whole call.
    pub span: Span,
}

/// Result of analyzing a single source file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Path relative to project root.
    pub file_path: PathBuf,
    /// Leading block comment of the file, if the file starts with one.
    pub header: Option<CommentBlock>,
    /// Every function declaration, in source order.
    pub functions: Vec<FunctionInfo>,
    /// Every call expression, in source order.
    pub calls: Vec<CallSite>,
}

impl FileAnalysis {
    /// Text of the file header, or the empty string when there is none.
    #[must_use]
    pub fn header_text(&self) -> &str {
        self.header.as_ref().map_or("", |h| h.text.as_str())
    }
}

/// Errors raised while extracting a [`FileAnalysis`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("Failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser produced no tree.
    #[error("Parser returned no syntax tree")]
    NoTree,
}

/// Trait for language-specific extraction.
///
/// Implement this to add support for a new language.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"kotlin"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".kt", ".kts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts the header, functions and call sites from source code.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed at all.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(return_type: Option<&str>) -> FunctionInfo {
        FunctionInfo {
            name: "f".to_string(),
            params: Vec::new(),
            return_type: return_type.map(String::from),
            body_children: Vec::new(),
            doc: None,
            span: Span::default(),
        }
    }

    #[test]
    fn unit_and_missing_return_types_are_unit() {
        assert!(!function(None).has_non_unit_return());
        assert!(!function(Some("Unit")).has_non_unit_return());
        assert!(function(Some("Boolean")).has_non_unit_return());
        assert!(function(Some("ListenableFuture<Result>")).has_non_unit_return());
    }

    #[test]
    fn header_text_defaults_to_empty() {
        let analysis = FileAnalysis::default();
        assert_eq!(analysis.header_text(), "");
    }
}
