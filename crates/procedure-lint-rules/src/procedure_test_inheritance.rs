//! Rule requiring procedure tests to extend the abstract procedure test case.
//!
//! A test class covering a procedure (via its covers annotation) must list
//! the abstract procedure test case as its direct parent. Going through an
//! intermediate base class does not count.

use procedure_lint_core::names;
use procedure_lint_core::{
    ClassDeclaration, ClassKind, FileContext, Replacement, Rule, Severity, Suggestion, Violation,
};
use tracing::debug;

/// Rule code for procedure-test-inheritance.
pub const CODE: &str = "PL004";

/// Rule name for procedure-test-inheritance.
pub const NAME: &str = "procedure-test-inheritance";

/// Diagnostic identifier emitted by this rule.
pub const IDENTIFIER: &str = "procedureTest.mustInheritAbstractTestCase";

/// Marker used when the covered class cannot be resolved.
const PROCEDURE_MARKER: &str = "Procedure";

/// Requires tests of procedures to directly extend the abstract test case.
#[derive(Debug, Clone)]
pub struct ProcedureTestInheritance {
    /// Severity level.
    pub severity: Severity,
}

impl Default for ProcedureTestInheritance {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcedureTestInheritance {
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

    /// Returns the class named by the first covers annotation with a class
    /// constant as its first argument.
    fn covered_class<'c>(ctx: &FileContext, class: &'c ClassDeclaration) -> Option<&'c str> {
        ctx.facts()
            .annotations(class, &ctx.conventions.covers_attribute)
            .into_iter()
            .find_map(|a| {
                a.argument("className", 0)
                    .or_else(|| a.args.first())
                    .and_then(|arg| arg.value.as_class_const())
            })
    }

    fn covers_procedure(ctx: &FileContext, covered: &str) -> bool {
        match ctx
            .facts()
            .is_subclass_of(covered, &ctx.conventions.procedure_base)
        {
            Some(is_procedure) => is_procedure,
            None => {
                debug!("Covered class {covered} is not resolvable, guessing from its name");
                names::short_name(covered).contains(PROCEDURE_MARKER)
            }
        }
    }
}

impl Rule for ProcedureTestInheritance {
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
        "Requires procedure tests to directly extend AbstractProcedureTestCase"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self, ctx: &FileContext, class: &ClassDeclaration) -> bool {
        class.kind == ClassKind::Class && ctx.tests.is_test_class(&class.name)
    }

    fn check(&self, ctx: &FileContext, class: &ClassDeclaration) -> Vec<Violation> {
        let Some(covered) = Self::covered_class(ctx, class) else {
            return vec![];
        };

        if !Self::covers_procedure(ctx, covered) {
            return vec![];
        }

        let base = &ctx.conventions.procedure_test_base;
        if ctx.facts().direct_parent_is(class, base) {
            return vec![];
        }

        let location = ctx.location(class.line);
        let base_short = names::short_name(base);
        let suggestion = format!(
            "Tests of procedure classes must directly extend {}.",
            names::normalize(base)
        );
        let suggestion = match &class.extends {
            Some(parent) => Suggestion::with_fix(
                suggestion,
                Replacement::rewrite(
                    location.clone(),
                    format!("extends {}", names::short_name(parent)),
                    format!("extends {base_short}"),
                ),
            ),
            None => Suggestion::new(suggestion),
        };

        vec![Violation::new(
            IDENTIFIER,
            NAME,
            self.severity,
            location,
            format!(
                "Test class {} covers {}, so it must directly extend {}.",
                names::normalize(&class.name),
                names::normalize(covered),
                names::normalize(base)
            ),
        )
        .with_suggestion(suggestion)
        .with_note(format!(
            "Example: final class YourProcedureTest extends {base_short}"
        ))
        .with_note("This rule must not be ignored.")]
    }
}
