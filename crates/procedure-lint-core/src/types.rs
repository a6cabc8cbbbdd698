//! Core types for lint violations and results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the analyzed source file.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// Creates a location at the start of a line.
    #[must_use]
    pub fn at_line(file: PathBuf, line: usize) -> Self {
        Self::new(file, line, 1)
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable tip, often a before/after diff.
    pub message: String,
    /// Optional automatic replacement.
    pub replacement: Option<Replacement>,
}

impl Suggestion {
    /// Creates a new suggestion without automatic fix.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    /// Creates a new suggestion with automatic fix.
    #[must_use]
    pub fn with_fix(message: impl Into<String>, replacement: Replacement) -> Self {
        Self {
            message: message.into(),
            replacement: Some(replacement),
        }
    }
}

/// An automatic code replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    /// Location to replace.
    pub location: Location,
    /// Text to replace, if the fix rewrites existing text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_text: Option<String>,
    /// New text to insert.
    pub new_text: String,
}

impl Replacement {
    /// Creates a replacement that inserts text.
    #[must_use]
    pub fn insert(location: Location, new_text: impl Into<String>) -> Self {
        Self {
            location,
            old_text: None,
            new_text: new_text.into(),
        }
    }

    /// Creates a replacement that rewrites `old_text` into `new_text`.
    #[must_use]
    pub fn rewrite(
        location: Location,
        old_text: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        Self {
            location,
            old_text: Some(old_text.into()),
            new_text: new_text.into(),
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Stable diagnostic identifier (e.g., "procedure.missingRequiredAttributes").
    pub identifier: String,
    /// Name of the rule that produced it (e.g., "required-attributes").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional tip for fixing.
    pub suggestion: Option<Suggestion>,
    /// Additional tips.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
            notes: Vec::new(),
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Adds a note to this violation.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Returns the tip text, if any.
    #[must_use]
    pub fn tip(&self) -> Option<&str> {
        self.suggestion.as_ref().map(|s| s.message.as_str())
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.identifier,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", indent_continuation(&suggestion.message));
        }
        for note in &self.notes {
            let _ = writeln!(output, "  = note: {note}");
        }
        output
    }
}

/// Indents every line after the first so multi-line tips stay aligned.
fn indent_continuation(text: &str) -> String {
    text.replace('\n', "\n          ")
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.identifier,
            self.message
        )
    }
}

/// A violation rendered through miette.
///
/// Snapshots carry no source text, so the report shows the message, code and
/// help without a labelled span.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    code: String,
    severity: miette::Severity,
    help: Option<String>,
}

impl ViolationDiagnostic {
    /// Returns the diagnostic code.
    #[must_use]
    pub fn code_str(&self) -> &str {
        &self.code
    }
}

impl Diagnostic for ViolationDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        let mut help: Vec<String> = v.suggestion.iter().map(|s| s.message.clone()).collect();
        help.extend(v.notes.iter().cloned());

        Self {
            message: format!(
                "{}:{}: {}",
                v.location.file.display(),
                v.location.line,
                v.message
            ),
            code: v.identifier.clone(),
            severity: match v.severity {
                Severity::Error => miette::Severity::Error,
                Severity::Warning => miette::Severity::Warning,
                Severity::Info => miette::Severity::Advice,
            },
            help: if help.is_empty() {
                None
            } else {
                Some(help.join("\n"))
            },
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of class declarations checked.
    #[serde(default)]
    pub classes_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns violations with the given identifier.
    #[must_use]
    pub fn by_identifier(&self, identifier: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.identifier == identifier)
            .collect()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
        self.classes_checked += other.classes_checked;
    }

    /// Sorts violations by file, then line, then column.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });
    }
}
