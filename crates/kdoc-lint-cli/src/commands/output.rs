//! Rendering of lint results.

use anyhow::Result;
use kdoc_lint_core::{LintResult, SeverityCounts, Violation, ViolationDiagnostic};
use miette::{NamedSource, Report};

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Prints `result` in `format`.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for violation in &result.violations {
                println!("{}", violation.format());
            }
            print_summary(result);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => {
            for violation in &result.violations {
                println!("{violation}");
            }
        }
        OutputFormat::Pretty => {
            for violation in &result.violations {
                println!("{:?}", pretty_report(violation));
            }
            print_summary(result);
        }
    }
    Ok(())
}

fn print_summary(result: &LintResult) {
    let counts = result.counts();
    println!(
        "{}Found {counts} in {} file(s){RESET}",
        summary_color(counts),
        result.files_checked
    );
}

fn summary_color(counts: SeverityCounts) -> &'static str {
    if counts.errors > 0 {
        RED
    } else if counts.warnings > 0 {
        YELLOW
    } else {
        GREEN
    }
}

/// Wraps a violation in a miette report carrying the file's source, so
/// the header or KDoc block is shown with the failing lines marked.
fn pretty_report(violation: &Violation) -> Report {
    let report = Report::new(ViolationDiagnostic::from(violation));
    let file = &violation.location.file;
    match std::fs::read_to_string(file) {
        Ok(source) => report.with_source_code(NamedSource::new(file.display().to_string(), source)),
        Err(e) => {
            tracing::debug!("No source for {}: {}", file.display(), e);
            report
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_color_follows_worst_severity() {
        let counts = |errors, warnings| SeverityCounts {
            errors,
            warnings,
            infos: 3,
        };
        assert_eq!(summary_color(counts(1, 1)), RED);
        assert_eq!(summary_color(counts(0, 2)), YELLOW);
        assert_eq!(summary_color(counts(0, 0)), GREEN);
    }
}
