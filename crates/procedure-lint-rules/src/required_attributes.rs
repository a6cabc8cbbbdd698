//! Rule requiring the tag, doc and expose annotations on every procedure.
//!
//! Missing annotations are reported together in one diagnostic, listed in
//! the order tag, doc, expose.

use procedure_lint_core::names;
use procedure_lint_core::{ClassDeclaration, FileContext, Rule, Severity, Suggestion, Violation};

/// Rule code for required-attributes.
pub const CODE: &str = "PL002";

/// Rule name for required-attributes.
pub const NAME: &str = "required-attributes";

/// Diagnostic identifier emitted by this rule.
pub const IDENTIFIER: &str = "procedure.missingRequiredAttributes";

/// Requires every procedure to carry the framework metadata annotations.
#[derive(Debug, Clone)]
pub struct RequiredAttributes {
    /// Severity level.
    pub severity: Severity,
}

impl Default for RequiredAttributes {
    fn default() -> Self {
        Self::new()
    }
}

impl RequiredAttributes {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for RequiredAttributes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn identifiers(&self) -> &'static [&'static str] {
        &[IDENTIFIER]
    }

    fn description(&self) -> &'static str {
        "Requires MethodTag, MethodDoc and MethodExpose on procedure classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self, ctx: &FileContext, class: &ClassDeclaration) -> bool {
        ctx.facts().is_checkable_procedure(class)
    }

    fn check(&self, ctx: &FileContext, class: &ClassDeclaration) -> Vec<Violation> {
        let missing: Vec<&str> = ctx
            .conventions
            .required_attributes()
            .into_iter()
            .filter(|name| !class.has_annotation(name))
            .map(names::normalize)
            .collect();

        if missing.is_empty() {
            return vec![];
        }

        let hint = missing
            .iter()
            .map(|name| format!("#[{}]", names::short_name(name)))
            .collect::<Vec<_>>()
            .join(", ");

        vec![Violation::new(
            IDENTIFIER,
            NAME,
            self.severity,
            ctx.location(class.line),
            format!(
                "Class {} must have the following attributes: {}.",
                names::normalize(&class.name),
                missing.join(", ")
            ),
        )
        .with_suggestion(Suggestion::new(format!(
            "Add {hint} to the class declaration."
        )))]
    }
}
