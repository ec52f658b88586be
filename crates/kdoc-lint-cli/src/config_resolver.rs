//! Configuration file resolution.
//!
//! Resolution order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `kdoc-lint.toml` or `.kdoc-lint.toml` in the checked directory or one
//!    of its ancestors, up to the Gradle project root
//! 3. `~/.kdoc-lint/config.toml` (global fallback)
//! 4. No config found: defaults
//!
//! Checking a single module (`app/`) or a single file of a multi-module
//! Gradle build therefore still picks up the configuration at the root of
//! the build.

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the checked directory or an ancestor within the project.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.kdoc-lint/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["kdoc-lint.toml", ".kdoc-lint.toml"];

/// Files marking the root of a build; the upward search stops there.
const PROJECT_ROOT_MARKERS: &[&str] = &["settings.gradle.kts", "settings.gradle", ".git"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for checking `target`.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(target, explicit, global_config_dir())
}

fn resolve_inner(target: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(target) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.exists())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

/// Walks from `target` towards the filesystem root, stopping after the
/// first directory that carries a project root marker.
fn find_project_config(target: &Path) -> Option<PathBuf> {
    let start = if target.is_file() { target.parent()? } else { target };

    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if PROJECT_ROOT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            break;
        }
    }
    None
}

/// Returns the global config directory path.
///
/// `$KDOC_LINT_CONFIG_DIR` when set, `~/.kdoc-lint/` otherwise.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("KDOC_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".kdoc-lint"))
}
