//! Core analyzer for orchestrating lint execution.

use crate::config::{AnalyzerConfig, Config};
use crate::context::FileContext;
use crate::extractor::{ExtractError, LanguageExtractor};
use crate::rule::{Rule, RuleBox};
use crate::types::{Label, LintResult, Violation};
use crate::utils::allowance::{check_allow_with_reason, AllowCheck};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the source tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Extractor failure.
        source: ExtractError,
    },

    /// No extractor handles the file's extension.
    #[error("No extractor registered for {0}")]
    Unsupported(PathBuf),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    extractors: Vec<Box<dyn LanguageExtractor>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Registers a language extractor.
    #[must_use]
    pub fn extractor<E: LanguageExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors, overriding `[analyzer]`.
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.analyzer.exclude.clone());
        }
        if exclude_patterns.is_empty() {
            exclude_patterns = AnalyzerConfig::default().exclude;
        }
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            extractors: self.extractors,
            exclude_patterns,
            excludes,
            fail_on_parse_error: self
                .fail_on_parse_error
                .or_else(|| self.config.as_ref().map(|c| c.analyzer.fail_on_parse_error))
                .unwrap_or(false),
            config: self.config.unwrap_or_default(),
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    extractors: Vec<Box<dyn LanguageExtractor>>,
    exclude_patterns: Vec<String>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, a file cannot be read, or
    /// a file fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.check_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, source }) => {
                    warn!("Failed to parse {}: {}", path.display(), source);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, source });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Runs every enabled rule over one in-memory source file.
    ///
    /// # Errors
    ///
    /// Returns an error if no extractor handles the file or the extractor
    /// cannot parse it.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let extractor = self
            .extractor_for(path)
            .ok_or_else(|| AnalyzerError::Unsupported(path.to_path_buf()))?;

        let ctx = FileContext::new(path, content, &self.root);
        let mut analysis = extractor
            .analyze(content)
            .map_err(|source| AnalyzerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        analysis.file_path.clone_from(&ctx.relative_path);

        let mut violations = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &analysis);
            let rule_violations = Self::apply_allowances(rule.as_ref(), content, rule_violations);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Drops violations suppressed by an inline allow directive.
    ///
    /// A directive without a reason on a rule that requires one does not
    /// suppress; the violation gains a label pointing at the directive.
    fn apply_allowances(rule: &dyn Rule, content: &str, violations: Vec<Violation>) -> Vec<Violation> {
        violations
            .into_iter()
            .filter_map(|v| match check_allow_with_reason(content, v.location.line, rule.name()) {
                AllowCheck::Denied => Some(v),
                AllowCheck::Allowed { reason: Some(reason) } => {
                    debug!("{} allowed at line {}: {}", rule.name(), v.location.line, reason);
                    None
                }
                AllowCheck::Allowed { reason: None } if !rule.requires_allow_reason() => None,
                AllowCheck::Allowed { reason: None } => {
                    let location = v.location.clone();
                    Some(v.with_label(Label::new(
                        location,
                        "allow directive ignored: this rule requires reason=\"...\"",
                    )))
                }
            })
            .collect()
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    fn extractor_for(&self, path: &Path) -> Option<&dyn LanguageExtractor> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))?;
        self.extractors
            .iter()
            .find(|e| e.extensions().contains(&ext.as_str()))
            .map(AsRef::as_ref)
    }

    /// Discovers all source files some extractor can handle.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || self.extractor_for(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let rel_str = rel.to_string_lossy();
        let path_str = path.to_string_lossy();

        if self
            .excludes
            .iter()
            .any(|p| p.matches(&rel_str) || p.matches(&path_str))
        {
            return true;
        }

        // "**/build/**" should also catch a top-level "build/" directory.
        self.exclude_patterns.iter().any(|pattern| {
            let clean = pattern.replace("**/", "").replace("/**", "");
            !clean.is_empty()
                && !clean.contains('*')
                && rel.components().any(|c| c.as_os_str() == clean.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{FileAnalysis, FunctionInfo, Span};
    use crate::types::{Location, Severity};

    /// Treats every line starting with `fun ` as a function.
    struct LineExtractor;

    impl LanguageExtractor for LineExtractor {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".kt"]
        }

        fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
            if source.contains("<unparseable>") {
                return Err(ExtractError::NoTree);
            }
            let functions = source
                .lines()
                .enumerate()
                .filter(|(_, l)| l.starts_with("fun "))
                .map(|(i, l)| FunctionInfo {
                    name: l.trim_start_matches("fun ").to_string(),
                    params: Vec::new(),
                    return_type: None,
                    body_children: Vec::new(),
                    doc: None,
                    span: Span {
                        line: i + 1,
                        column: 1,
                        offset: 0,
                        length: l.len(),
                    },
                })
                .collect();
            Ok(FileAnalysis {
                functions,
                ..FileAnalysis::default()
            })
        }
    }

    struct EveryFunction(Severity);

    impl Rule for EveryFunction {
        fn name(&self) -> &'static str {
            "every-function"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn default_severity(&self) -> Severity {
            self.0
        }
        fn check(&self, ctx: &FileContext, analysis: &FileAnalysis) -> Vec<Violation> {
            analysis
                .functions
                .iter()
                .map(|f| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.0,
                        Location::new(ctx.relative_path.clone(), f.span.line, 1),
                        f.name.clone(),
                    )
                })
                .collect()
        }
    }

    fn analyzer(severity: Severity) -> Analyzer {
        Analyzer::builder()
            .root("/project")
            .extractor(LineExtractor)
            .rule(EveryFunction(severity))
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/build/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_invalid_exclude_is_rejected() {
        let err = Analyzer::builder().exclude("[").build().err();
        assert!(matches!(err, Some(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/foo")
            .exclude("**/build/**")
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/app/build/tmp/Main.kt")));
        assert!(analyzer.should_exclude(Path::new("/foo/build/Main.kt")));
        assert!(analyzer.should_exclude(Path::new("/foo/generated/Main.kt")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/Main.kt")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/BuildConfig.kt")));
    }

    #[test]
    fn test_check_source_runs_rules() {
        let violations = analyzer(Severity::Warning)
            .check_source(Path::new("/project/src/A.kt"), "fun a\nfun b\n")
            .expect("check");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].location.file, PathBuf::from("src/A.kt"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = analyzer(Severity::Warning)
            .check_source(Path::new("/project/a.java"), "")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Unsupported(_)));
    }

    #[test]
    fn test_parse_error_is_surfaced() {
        let err = analyzer(Severity::Warning)
            .check_source(Path::new("/project/A.kt"), "<unparseable>")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Parse { .. }));
    }

    #[test]
    fn test_allow_directive_with_reason_suppresses() {
        let source = "// kdoc-lint: allow(every-function) reason=\"generated\"\nfun a\nfun b\n";
        let violations = analyzer(Severity::Error)
            .check_source(Path::new("/project/A.kt"), source)
            .expect("check");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "b");
    }

    #[test]
    fn test_allow_directive_without_reason_on_error_rule_is_labelled() {
        let source = "// kdoc-lint: allow(every-function)\nfun a\n";
        let violations = analyzer(Severity::Error)
            .check_source(Path::new("/project/A.kt"), source)
            .expect("check");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].labels.len(), 1);

        let violations = analyzer(Severity::Warning)
            .check_source(Path::new("/project/A.kt"), source)
            .expect("check");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_disabled_rule_and_severity_override() {
        let config = Config::parse(
            r#"
[rules.every-function]
severity = "info"
"#,
        )
        .expect("config");
        let analyzer = Analyzer::builder()
            .root("/project")
            .config(config)
            .extractor(LineExtractor)
            .rule(EveryFunction(Severity::Error))
            .build()
            .expect("build");
        let violations = analyzer
            .check_source(Path::new("/project/A.kt"), "fun a\n")
            .expect("check");
        assert_eq!(violations[0].severity, Severity::Info);

        let config = Config::parse("[rules.every-function]\nenabled = false\n").expect("config");
        let analyzer = Analyzer::builder()
            .root("/project")
            .config(config)
            .extractor(LineExtractor)
            .rule(EveryFunction(Severity::Error))
            .build()
            .expect("build");
        assert!(analyzer
            .check_source(Path::new("/project/A.kt"), "fun a\n")
            .expect("check")
            .is_empty());
    }

    #[test]
    fn test_analyze_walks_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("src")).expect("mkdir");
        std::fs::create_dir_all(dir.path().join("build")).expect("mkdir");
        std::fs::write(dir.path().join("src/A.kt"), "fun a\n").expect("write");
        std::fs::write(dir.path().join("src/B.kt"), "<unparseable>").expect("write");
        std::fs::write(dir.path().join("build/C.kt"), "fun c\n").expect("write");
        std::fs::write(dir.path().join("src/notes.txt"), "fun z\n").expect("write");

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .extractor(LineExtractor)
            .rule(EveryFunction(Severity::Warning))
            .build()
            .expect("build");
        let result = analyzer.analyze().expect("analyze");
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].message, "a");

        let strict = Analyzer::builder()
            .root(dir.path())
            .extractor(LineExtractor)
            .fail_on_parse_error(true)
            .build()
            .expect("build");
        assert!(matches!(strict.analyze(), Err(AnalyzerError::Parse { .. })));
    }

    #[test]
    fn test_fail_on_parse_error_from_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("B.kt"), "<unparseable>").expect("write");
        let config = Config::parse("[analyzer]\nfail_on_parse_error = true\n").expect("config");

        let from_config = Analyzer::builder()
            .root(dir.path())
            .config(config.clone())
            .extractor(LineExtractor)
            .build()
            .expect("build");
        assert!(matches!(from_config.analyze(), Err(AnalyzerError::Parse { .. })));

        let overridden = Analyzer::builder()
            .root(dir.path())
            .config(config)
            .extractor(LineExtractor)
            .fail_on_parse_error(false)
            .build()
            .expect("build");
        assert_eq!(overridden.analyze().expect("analyze").files_checked, 0);
    }
}
