//! Core analyzer for orchestrating lint execution.

use crate::classify::{SuffixTestClassifier, TestClassifier};
use crate::config::Config;
use crate::context::FileContext;
use crate::model::SourceFile;
use crate::reflection::{Reflection, ReflectionIndex};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a snapshot file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    externals: Vec<PathBuf>,
    config: Option<Config>,
    test_classifier: Option<Box<dyn TestClassifier>>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single snapshot file) to analyze.
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

    /// Adds an include glob pattern selecting snapshot files.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Adds a snapshot file that only feeds the reflection index.
    #[must_use]
    pub fn external(mut self, path: impl Into<PathBuf>) -> Self {
        self.externals.push(path.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the default suffix-based test classifier.
    #[must_use]
    pub fn test_classifier<C: TestClassifier + 'static>(mut self, classifier: C) -> Self {
        self.test_classifier = Some(Box::new(classifier));
        self
    }

    /// Sets whether to fail on snapshot parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let mut include_patterns = self.include_patterns;
        if include_patterns.is_empty() {
            include_patterns.extend(config.analyzer.include.iter().cloned());
        }

        let mut externals = self.externals;
        externals.extend(config.analyzer.externals.iter().cloned());

        let test_classifier = self.test_classifier.unwrap_or_else(|| {
            Box::new(SuffixTestClassifier::new(
                config.conventions.test_class_suffixes.iter().cloned(),
            ))
        });

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            include_patterns,
            externals,
            config,
            test_classifier,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    externals: Vec<PathBuf>,
    config: Config,
    test_classifier: Box<dyn TestClassifier>,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads all snapshots under the root and analyzes them.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a snapshot
    /// fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} snapshot(s) to analyze", files.len());

        let sources = self.load_all(&files)?;

        let external_paths: Vec<PathBuf> = self
            .externals
            .iter()
            .map(|p| self.resolve_path(p))
            .collect();
        let externals = self.load_all(&external_paths)?;

        self.analyze_sources(&sources, &externals)
    }

    /// Analyzes already loaded snapshots.
    ///
    /// Types from `externals` are resolvable but not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be created.
    pub fn analyze_sources(
        &self,
        sources: &[SourceFile],
        externals: &[SourceFile],
    ) -> Result<LintResult, AnalyzerError> {
        let index = ReflectionIndex::from_declarations(
            externals
                .iter()
                .chain(sources)
                .flat_map(|f| f.classes.iter()),
        );
        debug!("Reflection index holds {} type(s)", index.len());

        self.check_sources(&index, sources)
    }

    /// Runs every rule over `sources` against a given reflection snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be created.
    pub fn check_sources(
        &self,
        reflection: &dyn Reflection,
        sources: &[SourceFile],
    ) -> Result<LintResult, AnalyzerError> {
        let run = || {
            sources
                .par_iter()
                .map(|source| self.check_file(reflection, source))
                .reduce(LintResult::new, |mut acc, r| {
                    acc.extend(r);
                    acc
                })
        };

        let mut result = match self.config.analyzer.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| AnalyzerError::ThreadPool(e.to_string()))?
                .install(run),
            None => run(),
        };

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks every class of one file.
    fn check_file(&self, reflection: &dyn Reflection, source: &SourceFile) -> LintResult {
        debug!("Analyzing: {}", source.path.display());

        let ctx = FileContext::new(
            &source.path,
            reflection,
            &*self.test_classifier,
            &self.config.conventions,
        );

        let mut result = LintResult::new();
        for class in &source.classes {
            for rule in &self.rules {
                if !self.config.is_rule_enabled(rule.name()) {
                    debug!("Skipping disabled rule: {}", rule.name());
                    continue;
                }

                if !rule.applies_to(&ctx, class) {
                    continue;
                }

                let violations = rule.check(&ctx, class);
                let violations = self.apply_severity_override(rule.name(), violations);
                result.violations.extend(violations);
            }
        }

        result.files_checked = 1;
        result.classes_checked = source.classes.len();
        result
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

    /// Loads snapshots, skipping unparsable ones unless configured otherwise.
    fn load_all(&self, paths: &[PathBuf]) -> Result<Vec<SourceFile>, AnalyzerError> {
        let mut sources = Vec::with_capacity(paths.len());

        for path in paths {
            match load_snapshot(path) {
                Ok(source) => sources.push(source),
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(sources)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        if self.root.is_dir() {
            self.root.join(path)
        } else {
            self.root
                .parent()
                .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
        }
    }

    /// Discovers all snapshot files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let include: Vec<glob::Pattern> = self
            .include_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<_, _>>()?;

        let externals: Vec<PathBuf> = self
            .externals
            .iter()
            .map(|p| self.resolve_path(p))
            .collect();

        let walker = ignore::WalkBuilder::new(&self.root)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.into_path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path.as_path());

            if !include.iter().any(|p| include_matches(p, relative)) {
                continue;
            }

            if externals.contains(&path) {
                debug!("Not analyzing external: {}", path.display());
                continue;
            }

            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path);
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/vendor/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}

/// Matches a relative path, letting a leading `**/` also match top-level files.
fn include_matches(pattern: &glob::Pattern, relative: &Path) -> bool {
    if pattern.matches_path(relative) {
        return true;
    }

    match (pattern.as_str().strip_prefix("**/"), relative.file_name()) {
        (Some(rest), Some(name)) => {
            glob::Pattern::new(rest).is_ok_and(|p| p.matches(&name.to_string_lossy()))
        }
        _ => false,
    }
}

/// Reads and parses one snapshot file.
fn load_snapshot(path: &Path) -> Result<SourceFile, AnalyzerError> {
    let content = std::fs::read_to_string(path)?;
    let mut source = SourceFile::from_json(&content).map_err(|e| AnalyzerError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if source.path.as_os_str().is_empty() {
        source.path = path.to_path_buf();
    }

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassDeclaration;
    use crate::types::{Location, Severity};

    struct EveryClass;

    impl Rule for EveryClass {
        fn name(&self) -> &'static str {
            "every-class"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn identifiers(&self) -> &'static [&'static str] {
            &["test.everyClass"]
        }
        fn applies_to(&self, _ctx: &FileContext, class: &ClassDeclaration) -> bool {
            class.is_concrete_class()
        }
        fn check(&self, ctx: &FileContext, class: &ClassDeclaration) -> Vec<Violation> {
            vec![Violation::new(
                "test.everyClass",
                self.name(),
                self.default_severity(),
                Location::at_line(ctx.path.to_path_buf(), class.line),
                class.name.clone(),
            )]
        }
    }

    fn source(path: &str, classes: &[(&str, usize)]) -> SourceFile {
        SourceFile {
            path: PathBuf::from(path),
            classes: classes
                .iter()
                .map(|(name, line)| {
                    let mut c = ClassDeclaration::new(*name);
                    c.line = *line;
                    c
                })
                .collect(),
        }
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/vendor/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.include_patterns, vec!["**/*.classes.json"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/vendor/a.classes.json")));
        assert!(analyzer.should_exclude(Path::new("/foo/generated/b.classes.json")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/c.classes.json")));
    }

    #[test]
    fn test_include_matches_top_level_and_nested() {
        let p = glob::Pattern::new("**/*.classes.json").unwrap();
        assert!(include_matches(&p, Path::new("a.classes.json")));
        assert!(include_matches(&p, Path::new("src/deep/a.classes.json")));
        assert!(!include_matches(&p, Path::new("src/a.json")));
    }

    #[test]
    fn test_analyze_sources_sorts_and_counts() {
        let analyzer = Analyzer::builder()
            .root(".")
            .rule(EveryClass)
            .build()
            .unwrap();

        let sources = vec![
            source("b.php", &[("App\\B", 3)]),
            source("a.php", &[("App\\A2", 9), ("App\\A1", 2)]),
        ];
        let result = analyzer.analyze_sources(&sources, &[]).unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.classes_checked, 3);
        let order: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(order, vec!["App\\A1", "App\\A2", "App\\B"]);
    }

    #[test]
    fn test_disabled_rule_and_severity_override() {
        let config = Config::parse("[rules.every-class]\nseverity = \"info\"\n").unwrap();
        let analyzer = Analyzer::builder()
            .root(".")
            .config(config)
            .rule(EveryClass)
            .build()
            .unwrap();
        let result = analyzer
            .analyze_sources(&[source("a.php", &[("App\\A", 1)])], &[])
            .unwrap();
        assert_eq!(result.violations[0].severity, Severity::Info);

        let config = Config::parse("[rules.every-class]\nenabled = false\n").unwrap();
        let analyzer = Analyzer::builder()
            .root(".")
            .config(config)
            .rule(EveryClass)
            .build()
            .unwrap();
        let result = analyzer
            .analyze_sources(&[source("a.php", &[("App\\A", 1)])], &[])
            .unwrap();
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_bounded_parallelism() {
        let config = Config::parse("[analyzer]\nparallelism = 2\n").unwrap();
        let analyzer = Analyzer::builder()
            .root(".")
            .config(config)
            .rule(EveryClass)
            .build()
            .unwrap();
        let sources: Vec<SourceFile> = (0..16)
            .map(|i| source(&format!("f{i:02}.php"), &[("App\\X", 1)]))
            .collect();
        let result = analyzer.analyze_sources(&sources, &[]).unwrap();
        assert_eq!(result.violations.len(), 16);
        assert_eq!(result.violations[0].location.file, PathBuf::from("f00.php"));
    }
}
