//! Context types for rule execution.

use crate::types::Violation;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// File name without its extension (`Foo` for `src/Foo.kt`).
    ///
    /// Kotlin files conventionally share the name of their primary class,
    /// so this is the name the header's file-name line must carry.
    #[must_use]
    pub fn file_stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Byte range of `line` (1-indexed), without its line terminator.
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for (i, text) in self.content.split_inclusive('\n').enumerate() {
            if i + 1 == line {
                let body = text.trim_end_matches(['\n', '\r']);
                return Some(start..start + body.len());
            }
            start += text.len();
        }
        None
    }

    /// Gives every label of `violation` without a byte span the span of
    /// its line, so diagnostics can point at it.
    #[must_use]
    pub fn span_labels(&self, mut violation: Violation) -> Violation {
        for label in violation.labels.iter_mut().filter(|l| l.location.length == 0) {
            if let Some(range) = self.line_range(label.location.line) {
                label.location.offset = range.start;
                label.location.length = range.len();
            }
        }
        violation
    }
}
