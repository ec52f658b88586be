//! Kotlin language extractor using Tree-sitter.
//!
//! Functions and calls come from the syntax tree. The file header and the
//! KDoc attached to a function are located on the source text instead,
//! because comment placement in the tree depends on how the grammar
//! attaches extras.

use kdoc_lint_core::{
    CallSite, CommentBlock, ExtractError, FileAnalysis, FunctionInfo, LanguageExtractor, Span,
};
use tree_sitter::{Language, Node, Parser};

const IDENTIFIER_KINDS: &[&str] = &["identifier", "simple_identifier"];

/// Subtrees that never hold a parameter's name.
const SKIPPED_IN_PARAMETER: &[&str] = &["modifiers", "parameter_modifiers", "annotation"];

/// Extracts the header, functions and calls from Kotlin source.
pub struct KotlinExtractor {
    language: Language,
}

impl KotlinExtractor {
    /// Creates a new Kotlin extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_kotlin_ng::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a str) -> &'a str {
        src.get(node.start_byte()..node.end_byte()).unwrap_or("")
    }

    fn node_span(node: &Node<'_>) -> Span {
        Span {
            line: node.start_position().row + 1,
            column: node.start_position().column + 1,
            offset: node.start_byte(),
            length: node.end_byte() - node.start_byte(),
        }
    }

    fn function_name(node: &Node<'_>, src: &str) -> Option<String> {
        if let Some(name) = node.child_by_field_name("name") {
            return Some(Self::text(&name, src).to_owned());
        }
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|c| IDENTIFIER_KINDS.contains(&c.kind()))
            .map(|c| Self::text(&c, src).to_owned());
        name
    }

    /// First identifier of a parameter in source order, skipping modifiers
    /// and annotations.
    fn parameter_name(node: &Node<'_>, src: &str) -> Option<String> {
        if IDENTIFIER_KINDS.contains(&node.kind()) {
            return Some(Self::text(node, src).to_owned());
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        children
            .iter()
            .filter(|c| !SKIPPED_IN_PARAMETER.contains(&c.kind()))
            .find_map(|c| Self::parameter_name(c, src))
    }

    fn parameters(params: &Node<'_>, src: &str) -> Vec<String> {
        let mut cursor = params.walk();
        let children: Vec<Node<'_>> = params.named_children(&mut cursor).collect();
        children
            .iter()
            .filter(|c| c.kind().ends_with("parameter"))
            .filter_map(|c| Self::parameter_name(c, src))
            .collect()
    }

    /// Parameter names and the return type written after them.
    fn signature(node: &Node<'_>, src: &str) -> (Vec<String>, Option<String>) {
        let mut params = Vec::new();
        let mut return_type = None;
        let mut after_params = false;
        let mut expect_type = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "function_value_parameters" => {
                    params = Self::parameters(&child, src);
                    after_params = true;
                }
                ":" if after_params => expect_type = true,
                "function_body" | "block" | "=" | "type_constraints" => break,
                _ if expect_type && child.is_named() => {
                    return_type = Some(Self::text(&child, src).trim().to_owned());
                    break;
                }
                _ => {}
            }
        }
        (params, return_type)
    }

    /// Text of each direct child of the body block, or of the expression
    /// for `= expr` bodies. Comments among the children are included.
    fn body_children(node: &Node<'_>, src: &str) -> Vec<String> {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        for (i, child) in children.iter().enumerate() {
            match child.kind() {
                "block" => return Self::block_children(child, src),
                "function_body" => {
                    let mut cursor = child.walk();
                    let inner: Vec<Node<'_>> = child.named_children(&mut cursor).collect();
                    return match inner.as_slice() {
                        [block] if block.kind() == "block" => Self::block_children(block, src),
                        _ => inner.iter().map(|c| Self::text(c, src).to_owned()).collect(),
                    };
                }
                "=" => {
                    return children[i + 1..]
                        .iter()
                        .find(|c| c.is_named())
                        .map(|c| vec![Self::text(c, src).to_owned()])
                        .unwrap_or_default();
                }
                _ => {}
            }
        }
        Vec::new()
    }

    fn block_children(block: &Node<'_>, src: &str) -> Vec<String> {
        let mut cursor = block.walk();
        let mut children: Vec<Node<'_>> = block.named_children(&mut cursor).collect();
        let statements = match children.as_slice() {
            [only] if only.kind() == "statements" => Some(*only),
            _ => None,
        };
        if let Some(statements) = statements {
            let mut cursor = statements.walk();
            children = statements.named_children(&mut cursor).collect();
        }
        children
            .iter()
            .map(|c| Self::text(c, src).to_owned())
            .collect()
    }

    fn extract_function(node: &Node<'_>, src: &str) -> Option<FunctionInfo> {
        let name = Self::function_name(node, src)?;
        let (params, return_type) = Self::signature(node, src);
        Some(FunctionInfo {
            name,
            params,
            return_type,
            body_children: Self::body_children(node, src),
            doc: preceding_kdoc(src, node.start_byte()),
            span: Self::node_span(node),
        })
    }

    fn extract_call(node: &Node<'_>, src: &str) -> Option<CallSite> {
        let callee = node.named_child(0)?;
        let callee: String = Self::text(&callee, src).split_whitespace().collect();
        Some(CallSite {
            callee,
            span: Self::node_span(node),
        })
    }
}

impl Default for KotlinExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for KotlinExtractor {
    fn language_id(&self) -> &'static str {
        "kotlin"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".kt", ".kts"]
    }

    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: "kotlin",
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or(ExtractError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("kotlin source contains syntax errors; extracting what parsed");
        }

        let mut result = FileAnalysis {
            header: leading_block_comment(source),
            ..FileAnalysis::default()
        };

        // Pre-order walk keeps functions and calls in source order.
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match node.kind() {
                "function_declaration" => {
                    if let Some(function) = Self::extract_function(&node, source) {
                        result.functions.push(function);
                    }
                }
                "call_expression" => {
                    if let Some(call) = Self::extract_call(&node, source) {
                        result.calls.push(call);
                    }
                }
                _ => {}
            }
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        Ok(result)
    }
}

/// Line/column span of `src[start..end]`.
fn text_span(src: &str, start: usize, end: usize) -> Span {
    let before = &src[..start];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Span {
        line: before.matches('\n').count() + 1,
        column: start - line_start + 1,
        offset: start,
        length: end - start,
    }
}

/// The block comment the file starts with, after an optional byte order
/// mark and blank lines.
fn leading_block_comment(src: &str) -> Option<CommentBlock> {
    let body = src.strip_prefix('\u{feff}').unwrap_or(src);
    let start = src.len() - body.trim_start().len();
    if !src[start..].starts_with("/*") {
        return None;
    }
    let end = start + 2 + src[start + 2..].find("*/")? + 2;
    Some(CommentBlock {
        text: src[start..end].to_owned(),
        span: text_span(src, start, end),
    })
}

/// The `/** ... */` comment ending right before byte `start`, separated
/// from it by whitespace only.
fn preceding_kdoc(src: &str, start: usize) -> Option<CommentBlock> {
    let before = src.get(..start)?.trim_end();
    let body = before.strip_suffix("*/")?;
    let open = body.rfind("/**")?;
    if body[open + 3..].contains("*/") {
        return None;
    }
    Some(CommentBlock {
        text: before[open..].to_owned(),
        span: text_span(src, open, before.len()),
    })
}
