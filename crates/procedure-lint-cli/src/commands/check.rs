//! Check command implementation.

use anyhow::{Context, Result};
use procedure_lint_core::{Analyzer, Config, RuleBox};
use procedure_lint_rules::{select_rules, Preset};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Extra type-only snapshot files.
    pub externals: Vec<PathBuf>,
}

/// Runs the check command and reports whether any error was found.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = source.load()?;
    let rules = rules_for(&config, options.rules.as_deref());

    let mut builder = Analyzer::builder()
        .root(path)
        .excludes(options.exclude.iter().cloned())
        .config(config);

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    for external in externals_from(&cwd, &options.externals) {
        builder = builder.external(external);
    }

    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format)?;

    Ok(result.has_errors())
}

/// Anchors `--externals` at the working directory; externals from the config
/// file stay relative to the snapshot root.
fn externals_from(cwd: &Path, externals: &[PathBuf]) -> Vec<PathBuf> {
    externals.iter().map(|p| cwd.join(p)).collect()
}

/// Picks rules from `--rules`, else from the configured preset.
fn rules_for(config: &Config, filter: Option<&str>) -> Vec<RuleBox> {
    if let Some(filter) = filter {
        let names: Vec<&str> = filter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let rules = select_rules(&names);
        for name in &names {
            if !rules
                .iter()
                .any(|r| r.name() == *name || r.code().eq_ignore_ascii_case(name))
            {
                tracing::warn!("Unknown rule: {}", name);
            }
        }
        return rules;
    }

    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown preset '{}', using recommended", name);
            Preset::Recommended
        }),
    };

    preset.rules()
}
