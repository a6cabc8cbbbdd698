//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "procedure-lint.toml";

const DEFAULT_CONFIG: &str = r#"# procedure-lint configuration

# Rule preset: "recommended" (all rules) or "minimal"
preset = "recommended"

[analyzer]
# Directory holding the class snapshots (default: current directory)
# root = "./build/snapshots"

# Snapshot files to analyze
include = ["**/*.classes.json"]

# Glob patterns to exclude from analysis
exclude = ["**/vendor/**"]

# Snapshots that only provide types (framework base classes, interfaces)
# externals = ["build/framework.types.json"]

# Respect .gitignore files
respect_gitignore = true

# Maximum number of files analyzed in parallel
# parallelism = 4

# Framework names the rules check against
# [conventions]
# procedure_base = "Tourze\\JsonRPC\\Core\\Procedure\\BaseProcedure"
# param_capability = "Tourze\\JsonRPC\\Core\\Contracts\\RpcParamInterface"
# procedure_test_base = "Tourze\\PHPUnitJsonRPC\\AbstractProcedureTestCase"
# test_class_suffixes = ["Test"]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.method-expose-name]
enabled = true

[rules.required-attributes]
enabled = true

[rules.execute-param-doc]
enabled = true
# severity = "warning"

[rules.procedure-test-inheritance]
enabled = true
"#;

/// Runs the init command in `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Point analyzer.externals at your framework type snapshot");
    println!("  2. Run: procedure-lint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use procedure_lint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).expect("default config should parse");
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert!(config.is_rule_enabled("execute-param-doc"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        run(tmp.path(), false).unwrap();
        assert!(run(tmp.path(), false).is_err());
        assert!(run(tmp.path(), true).is_ok());
    }
}
