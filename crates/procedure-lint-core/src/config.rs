//! Configuration types for procedure-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for procedure-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Names of the framework types and markers the rules check against.
    #[serde(default)]
    pub conventions: Conventions,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory holding the snapshot files (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Glob patterns selecting snapshot files, relative to the root.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Snapshot files whose types feed the reflection index but are not checked.
    #[serde(default)]
    pub externals: Vec<PathBuf>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            include: default_include(),
            externals: Vec::new(),
            respect_gitignore: true,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/vendor/**".to_string()]
}

fn default_include() -> Vec<String> {
    vec!["**/*.classes.json".to_string()]
}

fn default_true() -> bool {
    true
}

/// Qualified names of the framework types and markers that define a
/// procedure and its conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Base type every procedure class extends.
    pub procedure_base: String,
    /// Capability interface implemented by RPC parameter types.
    pub param_capability: String,
    /// Annotation declaring the externally exposed method name.
    pub expose_attribute: String,
    /// Annotation tagging a procedure.
    pub tag_attribute: String,
    /// Annotation documenting a procedure.
    pub doc_attribute: String,
    /// Name of the expose annotation argument holding the method name.
    pub expose_argument: String,
    /// Method receiving the RPC parameter.
    pub execute_method: String,
    /// Doc directive declaring the narrow parameter type.
    pub narrow_directive: String,
    /// Generic doc directive that should be replaced by the narrow one.
    pub generic_directive: String,
    /// Annotation naming the class a test covers.
    pub covers_attribute: String,
    /// Abstract test case procedure tests must extend directly.
    pub procedure_test_base: String,
    /// Short-name suffixes identifying test classes.
    pub test_class_suffixes: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            procedure_base: "Tourze\\JsonRPC\\Core\\Procedure\\BaseProcedure".to_string(),
            param_capability: "Tourze\\JsonRPC\\Core\\Contracts\\RpcParamInterface".to_string(),
            expose_attribute: "Tourze\\JsonRPC\\Core\\Attribute\\MethodExpose".to_string(),
            tag_attribute: "Tourze\\JsonRPC\\Core\\Attribute\\MethodTag".to_string(),
            doc_attribute: "Tourze\\JsonRPC\\Core\\Attribute\\MethodDoc".to_string(),
            expose_argument: "method".to_string(),
            execute_method: "execute".to_string(),
            narrow_directive: "@phpstan-param".to_string(),
            generic_directive: "@param".to_string(),
            covers_attribute: "PHPUnit\\Framework\\Attributes\\CoversClass".to_string(),
            procedure_test_base: "Tourze\\PHPUnitJsonRPC\\AbstractProcedureTestCase".to_string(),
            test_class_suffixes: vec!["Test".to_string()],
        }
    }
}

impl Conventions {
    /// Required procedure annotations in canonical order: tag, doc, expose.
    #[must_use]
    pub fn required_attributes(&self) -> [&str; 3] {
        [
            self.tag_attribute.as_str(),
            self.doc_attribute.as_str(),
            self.expose_attribute.as_str(),
        ]
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert_eq!(config.analyzer.include, vec!["**/*.classes.json"]);
        assert_eq!(config.conventions.execute_method, "execute");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "minimal"

[analyzer]
root = "./snapshots"
exclude = ["**/generated/**"]
externals = ["vendor-types.classes.json"]

[conventions]
procedure_base = "App\\Rpc\\Procedure"
test_class_suffixes = ["Test", "Spec"]

[rules.execute-param-doc]
enabled = true
severity = "warning"

[rules.required-attributes]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("minimal"));
        assert_eq!(config.analyzer.root, PathBuf::from("./snapshots"));
        assert_eq!(config.analyzer.externals.len(), 1);
        assert_eq!(config.conventions.procedure_base, "App\\Rpc\\Procedure");
        // unspecified conventions keep their defaults
        assert_eq!(config.conventions.narrow_directive, "@phpstan-param");
        assert_eq!(config.conventions.test_class_suffixes, vec!["Test", "Spec"]);

        assert!(config.is_rule_enabled("execute-param-doc"));
        assert!(!config.is_rule_enabled("required-attributes"));
        assert!(config.is_rule_enabled("unknown-rule"));
        assert_eq!(
            config.rule_severity("execute-param-doc"),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn test_required_attributes_order() {
        let c = Conventions::default();
        let [tag, doc, expose] = c.required_attributes();
        assert!(tag.ends_with("MethodTag"));
        assert!(doc.ends_with("MethodDoc"));
        assert!(expose.ends_with("MethodExpose"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::parse("analyzer = 3"),
            Err(ConfigError::Parse { .. })
        ));
    }
}
