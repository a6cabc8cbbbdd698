//! Rule requiring a narrowed `@phpstan-param` directive on `execute()`.
//!
//! # Rationale
//!
//! `execute()` is declared against the RPC parameter capability interface,
//! often as a union with the concrete parameter type. Static analysis only
//! sees the concrete type when the doc comment narrows it:
//!
//! ```text
//! /**
//!  * @phpstan-param TestParam $param
//!  */
//! public function execute(TestParam|RpcParamInterface $param): array
//! ```
//!
//! # Detected Patterns
//!
//! - no directive at all (`procedure.missingPhpstanParam`)
//! - the generic `@param` directive only (`procedure.wrongParamAnnotation`)
//! - a narrow directive naming another type (`procedure.wrongPhpstanParamType`)

use procedure_lint_core::doc_type::{lookup_directive, matches_type, DirectiveLookup};
use procedure_lint_core::names;
use procedure_lint_core::narrowing::narrow_to_capability;
use procedure_lint_core::{
    ClassDeclaration, FileContext, Location, Replacement, Rule, Severity, Suggestion, Violation,
};
use tracing::debug;

/// Rule code for execute-param-doc.
pub const CODE: &str = "PL003";

/// Rule name for execute-param-doc.
pub const NAME: &str = "execute-param-doc";

/// No directive documents the parameter.
pub const MISSING: &str = "procedure.missingPhpstanParam";

/// Only the generic directive documents the parameter.
pub const WRONG_ANNOTATION: &str = "procedure.wrongParamAnnotation";

/// The narrow directive names the wrong type.
pub const WRONG_TYPE: &str = "procedure.wrongPhpstanParamType";

/// Requires `execute()` to document its narrowed parameter type.
#[derive(Debug, Clone)]
pub struct ExecuteParamDoc {
    /// Severity level.
    pub severity: Severity,
}

impl Default for ExecuteParamDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecuteParamDoc {
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

/// The parameter being checked and the type its doc must name.
struct Target<'a> {
    class: &'a str,
    method: &'a str,
    param: &'a str,
    doc: Option<&'a str>,
    expected: String,
    location: Location,
}

impl Target<'_> {
    fn short(&self) -> &str {
        names::short_name(&self.expected)
    }
}

impl Rule for ExecuteParamDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn identifiers(&self) -> &'static [&'static str] {
        &[MISSING, WRONG_ANNOTATION, WRONG_TYPE]
    }

    fn description(&self) -> &'static str {
        "Requires @phpstan-param with the concrete parameter type on execute()"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self, ctx: &FileContext, class: &ClassDeclaration) -> bool {
        let facts = ctx.facts();
        facts.is_checkable_procedure(class)
            && facts.method(class, &ctx.conventions.execute_method).is_some()
    }

    fn check(&self, ctx: &FileContext, class: &ClassDeclaration) -> Vec<Violation> {
        let conventions = ctx.conventions;
        let Some(method) = ctx.facts().method(class, &conventions.execute_method) else {
            return vec![];
        };

        let Some(param) = method.first_param() else {
            return vec![];
        };

        let Some(declared) = &param.declared_type else {
            return vec![];
        };

        let Some(expected) =
            narrow_to_capability(ctx.reflection, declared, &conventions.param_capability)
        else {
            debug!(
                "No member of {declared} implements {} on {}",
                conventions.param_capability, class.name
            );
            return vec![];
        };

        // Inherited methods have no line in this file.
        let line = if class.method(&conventions.execute_method).is_some() {
            method.line
        } else {
            class.line
        };

        let target = Target {
            class: names::normalize(&class.name),
            method: &method.name,
            param: param.name.trim_start_matches('$'),
            doc: method.doc.as_deref(),
            expected,
            location: ctx.location(line),
        };

        let lookup = lookup_directive(
            target.doc,
            &conventions.narrow_directive,
            &conventions.generic_directive,
            target.param,
        );

        match lookup {
            DirectiveLookup::Missing => vec![self.missing(ctx, &target)],
            DirectiveLookup::Generic { declared } => {
                vec![self.wrong_annotation(ctx, &target, &declared)]
            }
            DirectiveLookup::Narrow { declared } if !matches_type(&declared, &target.expected) => {
                vec![self.wrong_type(ctx, &target, &declared)]
            }
            DirectiveLookup::Narrow { .. } => vec![],
        }
    }
}

impl ExecuteParamDoc {
    fn missing(&self, ctx: &FileContext, target: &Target) -> Violation {
        let narrow = &ctx.conventions.narrow_directive;
        let doc_block = format!(
            "/**\n * {narrow} {} ${}\n */",
            target.short(),
            target.param
        );

        Violation::new(
            MISSING,
            NAME,
            self.severity,
            target.location.clone(),
            format!(
                "Procedure {} {}() must declare \"{narrow} {} ${}\" in docblock.",
                target.class,
                target.method,
                target.short(),
                target.param
            ),
        )
        .with_suggestion(Suggestion::with_fix(
            format!("Add a docblock above {}():\n{doc_block}", target.method),
            Replacement::insert(target.location.clone(), doc_block),
        ))
    }

    fn wrong_annotation(&self, ctx: &FileContext, target: &Target, declared: &str) -> Violation {
        let narrow = &ctx.conventions.narrow_directive;
        let generic = &ctx.conventions.generic_directive;
        let old = format!("{generic} {declared} ${}", target.param);
        let new = format!("{narrow} {} ${}", target.short(), target.param);

        Violation::new(
            WRONG_ANNOTATION,
            NAME,
            self.severity,
            target.location.clone(),
            format!(
                "Procedure {} {}() must use \"{narrow}\" instead of \"{generic}\" for parameter ${}.",
                target.class, target.method, target.param
            ),
        )
        .with_suggestion(Suggestion::with_fix(
            format!("- {old}\n+ {new}"),
            Replacement::rewrite(target.location.clone(), old, new),
        ))
    }

    fn wrong_type(&self, ctx: &FileContext, target: &Target, declared: &str) -> Violation {
        let narrow = &ctx.conventions.narrow_directive;
        let old = format!("{narrow} {declared} ${}", target.param);
        let new = format!("{narrow} {} ${}", target.short(), target.param);

        Violation::new(
            WRONG_TYPE,
            NAME,
            self.severity,
            target.location.clone(),
            format!(
                "Procedure {} {}() {narrow} type must be \"{}\", \"{declared}\" given.",
                target.class,
                target.method,
                target.short()
            ),
        )
        .with_suggestion(Suggestion::with_fix(
            format!("- {old}\n+ {new}"),
            Replacement::rewrite(target.location.clone(), old, new),
        ))
    }
}
