//! Check command implementation.

use anyhow::{Context, Result};
use kdoc_lint_core::{Analyzer, Config, RuleBox, Severity};
use kdoc_lint_rules::{rule_by_name, rules_from_config};
use kdoc_lint_ts::KotlinExtractor;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `kdoc-lint check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes replacing the configured set.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Preset overriding the config file.
    pub preset: Option<String>,
    /// Failure threshold overriding the config file.
    pub fail_on: Option<Severity>,
}

/// Runs the check command.
pub fn run(path: &Path, options: CheckOptions, source: &ConfigSource) -> Result<()> {
    let mut config = load_config(source)?;
    if options.preset.is_some() {
        config.preset = options.preset;
    }
    if options.fail_on.is_some() {
        config.fail_on = options.fail_on;
    }
    let threshold = config.fail_threshold();

    let rules_to_add = match options.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(&names, &config)
        }
        None => rules_from_config(&config),
    };

    let mut builder = Analyzer::builder()
        .root(path)
        .config(config)
        .extractor(KotlinExtractor::new())
        .excludes(options.exclude);
    for rule in rules_to_add {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format)?;

    if result.has_violations_at(threshold) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(p) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", p.display());
    }
    Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
}

fn filter_rules(names: &[&str], config: &Config) -> Vec<RuleBox> {
    names
        .iter()
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let rule = rule_by_name(name, config);
            if rule.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            rule
        })
        .collect()
}
