//! Rule trait for defining convention rules.

use crate::context::FileContext;
use crate::model::ClassDeclaration;
use crate::types::{Severity, Violation};

/// A convention rule evaluated once per class declaration.
///
/// Rules are stateless values. The analyzer calls [`Rule::applies_to`] first
/// and only calls [`Rule::check`] for applicable classes.
///
/// # Example
///
/// ```ignore
/// use procedure_lint_core::{ClassDeclaration, FileContext, Rule, Severity, Violation};
///
/// pub struct NoEmptyProcedures;
///
/// impl Rule for NoEmptyProcedures {
///     fn name(&self) -> &'static str { "no-empty-procedures" }
///     fn code(&self) -> &'static str { "PL100" }
///     fn identifiers(&self) -> &'static [&'static str] { &["procedure.empty"] }
///
///     fn applies_to(&self, ctx: &FileContext, class: &ClassDeclaration) -> bool {
///         ctx.facts().is_checkable_procedure(class)
///     }
///
///     fn check(&self, ctx: &FileContext, class: &ClassDeclaration) -> Vec<Violation> {
///         if class.methods.is_empty() {
///             vec![Violation::new(
///                 "procedure.empty",
///                 self.name(),
///                 self.default_severity(),
///                 ctx.location(class.line),
///                 format!("Procedure {} declares no methods.", class.name),
///             )]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "method-expose-name").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PL001").
    fn code(&self) -> &'static str;

    /// Returns the diagnostic identifiers this rule can emit.
    fn identifiers(&self) -> &'static [&'static str];

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Returns `true` if the rule should look at `class`.
    fn applies_to(&self, ctx: &FileContext, class: &ClassDeclaration) -> bool;

    /// Checks a single class and returns any violations found.
    fn check(&self, ctx: &FileContext, class: &ClassDeclaration) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SuffixTestClassifier;
    use crate::config::Conventions;
    use crate::reflection::ReflectionIndex;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn identifiers(&self) -> &'static [&'static str] {
            &["test.violation"]
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn applies_to(&self, _ctx: &FileContext, class: &ClassDeclaration) -> bool {
            class.is_concrete_class()
        }

        fn check(&self, ctx: &FileContext, class: &ClassDeclaration) -> Vec<Violation> {
            vec![Violation::new(
                self.identifiers()[0],
                self.name(),
                self.default_severity(),
                ctx.location(class.line),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);

        let index = ReflectionIndex::new();
        let tests = SuffixTestClassifier::default();
        let conventions = Conventions::default();
        let ctx = FileContext::new(Path::new("a.php"), &index, &tests, &conventions);

        let class = ClassDeclaration::new("App\\Foo");
        assert!(rule.applies_to(&ctx, &class));
        assert_eq!(rule.check(&ctx, &class)[0].identifier, "test.violation");
    }
}
