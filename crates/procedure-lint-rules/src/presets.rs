//! Rule presets for common configurations.

use crate::{ExecuteParamDoc, MethodExposeName, ProcedureTestInheritance, RequiredAttributes};
use procedure_lint_core::RuleBox;

/// Preset configurations for procedure-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every procedure convention.
    Recommended,
    /// Declaration-only checks for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Parses a preset name as written in configuration files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `method-expose-name` (PL001)
/// - `required-attributes` (PL002)
/// - `execute-param-doc` (PL003)
/// - `procedure-test-inheritance` (PL004)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules.
///
/// Only the checks that look at annotations:
/// - `method-expose-name` (PL001)
/// - `required-attributes` (PL002)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MethodExposeName::new()),
        Box::new(RequiredAttributes::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MethodExposeName::new()),
        Box::new(RequiredAttributes::new()),
        Box::new(ExecuteParamDoc::new()),
        Box::new(ProcedureTestInheritance::new()),
    ]
}

/// Returns the rules whose name or code appears in `selection`, in registry
/// order.
#[must_use]
pub fn select_rules<S: AsRef<str>>(selection: &[S]) -> Vec<RuleBox> {
    all_rules()
        .into_iter()
        .filter(|rule| {
            selection
                .iter()
                .any(|s| s.as_ref() == rule.name() || s.as_ref().eq_ignore_ascii_case(rule.code()))
        })
        .collect()
}
