//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag or `$PROCEDURE_LINT_CONFIG` (explicit path)
//! 2. `procedure-lint.toml` or `.procedure-lint.toml` in the snapshot
//!    directory or the nearest ancestor, stopping at the repository root
//! 3. `~/.procedure-lint/config.toml` (global fallback)
//! 4. No config found → defaults

use anyhow::{Context, Result};
use procedure_lint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the snapshot directory or one of its ancestors.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.procedure-lint/`).
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

    /// Loads the configuration this source points at.
    pub fn load(&self) -> Result<Config> {
        let Some(p) = self.path() else {
            return Ok(Config::default());
        };

        if self.is_global() {
            tracing::info!("Using global config: {}", p.display());
        } else {
            tracing::debug!("Using config: {}", p.display());
        }

        Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["procedure-lint.toml", ".procedure-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Directory marking the top of a repository; the ancestor search stops there.
const REPOSITORY_MARKER: &str = ".git";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(project_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Searches `start` and its ancestors, nearest first.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        if let Some(found) = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            return Some(found);
        }

        if dir.join(REPOSITORY_MARKER).exists() {
            break;
        }
    }

    None
}

/// Returns the global config directory path.
///
/// Resolution: `$PROCEDURE_LINT_CONFIG_DIR` > `~/.procedure-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("PROCEDURE_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".procedure-lint"))
}
