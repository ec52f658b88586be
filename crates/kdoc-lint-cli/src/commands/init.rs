//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# kdoc-lint configuration

# recommended | strict | minimal
preset = "recommended"

# Lowest severity that makes `kdoc-lint check` exit non-zero
# fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./app/src"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/.gradle/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.file-header]
enabled = true
# Organization named on the copyright line; any name when unset
# organization = "Acme Widgets"
# Report every broken clause, not only the first structural failure
attribute_clauses = false

[rules.function-doc]
enabled = true

[rules.forbidden-log-call]
enabled = true
wrapper = "TLog"

# [rules.too-many-functions]
# enabled = true
# max_functions = 2
# severity = "info"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("kdoc-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created kdoc-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit kdoc-lint.toml to configure rules");
    println!("  2. Run: kdoc-lint check");

    Ok(())
}
