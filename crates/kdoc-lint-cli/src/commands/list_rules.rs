//! List rules command implementation.

use kdoc_lint_rules::{all_rules, IssueKind, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<22} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));
    for rule in all_rules() {
        println!(
            "{:<8} {:<22} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity(),
            rule.description()
        );
    }

    println!("\nIssue codes reported by file-header and function-doc:\n");
    for kind in IssueKind::ALL {
        println!("  {:<10} {}", kind.code(), kind.message());
    }

    println!("\nPresets:");
    for (name, preset) in [
        ("recommended", Preset::Recommended),
        ("strict", Preset::Strict),
        ("minimal", Preset::Minimal),
    ] {
        println!("  {name:<12} {}", preset.rule_names().join(", "));
    }

    println!("\nSelect rules by name or code, e.g.:");
    println!("  kdoc-lint check --rules file-header,function-doc");
    println!("  kdoc-lint check --rules TOFIB,LOG001");
}
