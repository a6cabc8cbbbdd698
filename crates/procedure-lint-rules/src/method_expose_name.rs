//! Rule forbidding `.` in exposed RPC method names.
//!
//! # Rationale
//!
//! Exposed method names follow a verb + module + noun scheme (`AddToCart`).
//! Dotted names such as `user.create` read like namespaces and break clients
//! that route on the plain name.
//!
//! # Detected Patterns
//!
//! ```text
//! #[MethodExpose(method: 'user.create')]
//! #[MethodExpose('user.create')]
//! ```
//!
//! The method name is the argument named `method`, or the first positional
//! argument when no argument is named. Only string literals are evaluated.

use procedure_lint_core::names;
use procedure_lint_core::{ClassDeclaration, FileContext, Rule, Severity, Suggestion, Violation};
use tracing::debug;

/// Rule code for method-expose-name.
pub const CODE: &str = "PL001";

/// Rule name for method-expose-name.
pub const NAME: &str = "method-expose-name";

/// Diagnostic identifier emitted by this rule.
pub const IDENTIFIER: &str = "procedure.invalidMethodExposeName";

/// Forbids `.` in the method name of expose annotations.
#[derive(Debug, Clone)]
pub struct MethodExposeName {
    /// Severity level.
    pub severity: Severity,
}

impl Default for MethodExposeName {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodExposeName {
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

impl Rule for MethodExposeName {
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
        "Forbids '.' in the method name of MethodExpose annotations"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self, ctx: &FileContext, class: &ClassDeclaration) -> bool {
        ctx.facts().is_checkable_procedure(class)
    }

    fn check(&self, ctx: &FileContext, class: &ClassDeclaration) -> Vec<Violation> {
        let conventions = ctx.conventions;

        for annotation in ctx.facts().annotations(class, &conventions.expose_attribute) {
            let Some(argument) = annotation.argument(&conventions.expose_argument, 0) else {
                continue;
            };

            let Some(value) = argument.value.as_literal() else {
                debug!(
                    "Skipping non-literal method name on {} at line {}",
                    class.name, annotation.line
                );
                continue;
            };

            if value.contains('.') {
                return vec![Violation::new(
                    IDENTIFIER,
                    NAME,
                    self.severity,
                    ctx.location(annotation.line),
                    format!(
                        "In class {}, the method parameter of MethodExpose attribute cannot contain \".\". Invalid value: \"{value}\".",
                        names::normalize(&class.name)
                    ),
                )
                .with_suggestion(Suggestion::new(
                    "Name the method with a verb + module + noun, like `AddToCart`.",
                ))];
            }
        }

        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, class, procedure, EXPOSE};
    use procedure_lint_core::{Annotation, ArgValue, Argument, ClassKind};

    fn expose(line: usize, arg: Argument) -> Annotation {
        Annotation::new(EXPOSE, line).arg(arg)
    }

    fn named(value: &str) -> Argument {
        Argument::named("method", ArgValue::String(value.to_string()))
    }

    fn positional(value: &str) -> Argument {
        Argument::positional(ArgValue::String(value.to_string()))
    }

    fn check_class(class: &ClassDeclaration) -> Vec<Violation> {
        check(&MethodExposeName::new(), class)
    }

    #[test]
    fn test_detects_dotted_name() {
        let mut c = procedure("App\\Procedure\\UserCreateProcedure");
        c.annotations.push(expose(7, named("user.create")));

        let violations = check_class(&c);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].identifier, IDENTIFIER);
        assert_eq!(violations[0].location.line, 7);
        insta::assert_snapshot!(
            violations[0].message,
            @r#"In class App\Procedure\UserCreateProcedure, the method parameter of MethodExpose attribute cannot contain ".". Invalid value: "user.create"."#
        );
        assert!(violations[0].tip().is_some_and(|t| t.contains("AddToCart")));
    }

    #[test]
    fn test_allows_plain_and_empty_names() {
        for value in ["UserCreate", ""] {
            let mut c = procedure("App\\Procedure\\UserCreateProcedure");
            c.annotations.push(expose(7, named(value)));
            assert!(check_class(&c).is_empty(), "{value:?} was reported");
        }
    }

    #[test]
    fn test_positional_argument_is_checked() {
        let mut c = procedure("App\\Procedure\\UserCreateProcedure");
        c.annotations.push(expose(7, positional("user.create")));
        assert_eq!(check_class(&c).len(), 1);
    }

    #[test]
    fn test_positional_ignored_when_other_args_are_named() {
        let mut c = procedure("App\\Procedure\\UserCreateProcedure");
        c.annotations.push(
            Annotation::new(EXPOSE, 7)
                .arg(positional("user.create"))
                .arg(Argument::named("description", ArgValue::String("x".into()))),
        );
        assert!(check_class(&c).is_empty());
    }

    #[test]
    fn test_non_literal_is_not_evaluated() {
        let mut c = procedure("App\\Procedure\\UserCreateProcedure");
        c.annotations.push(expose(
            7,
            Argument::named("method", ArgValue::Expr("self::NAME . '.x'".into())),
        ));
        assert!(check_class(&c).is_empty());
    }

    #[test]
    fn test_reports_first_offending_annotation_only() {
        let mut c = procedure("App\\Procedure\\UserProcedure");
        c.annotations.push(expose(5, named("UserList")));
        c.annotations.push(expose(6, named("user.get")));
        c.annotations.push(expose(7, named("user.delete")));

        let violations = check_class(&c);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 6);
        assert!(violations[0].message.contains("\"user.get\""));
    }

    #[test]
    fn test_ignores_non_procedures() {
        let mut regular = class("App\\Service\\UserService", None);
        regular.annotations.push(expose(3, named("user.create")));
        assert!(check_class(&regular).is_empty());

        let mut abstract_proc = procedure("App\\Procedure\\AbstractUserProcedure");
        abstract_proc.is_abstract = true;
        abstract_proc.annotations.push(expose(3, named("user.create")));
        assert!(check_class(&abstract_proc).is_empty());

        let mut interface = procedure("App\\Procedure\\UserProcedureInterface");
        interface.kind = ClassKind::Interface;
        interface.annotations.push(expose(3, named("user.create")));
        assert!(check_class(&interface).is_empty());
    }
}
