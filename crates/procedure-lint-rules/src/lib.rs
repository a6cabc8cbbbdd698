//! # procedure-lint-rules
//!
//! Built-in convention rules for JSON-RPC procedure classes.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PL001 | `method-expose-name` | Forbids `.` in exposed method names |
//! | PL002 | `required-attributes` | Requires the tag, doc and expose annotations |
//! | PL003 | `execute-param-doc` | Requires a narrowed `@phpstan-param` on `execute()` |
//! | PL004 | `procedure-test-inheritance` | Requires procedure tests to directly extend the abstract test case |
//!
//! ## Usage
//!
//! ```ignore
//! use procedure_lint_core::Analyzer;
//! use procedure_lint_rules::{MethodExposeName, RequiredAttributes};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./build/snapshots")
//!     .rule(MethodExposeName::new())
//!     .rule(RequiredAttributes::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod execute_param_doc;
mod method_expose_name;
mod presets;
mod procedure_test_inheritance;
mod required_attributes;

#[cfg(test)]
mod test_support;

pub use execute_param_doc::ExecuteParamDoc;
pub use method_expose_name::MethodExposeName;
pub use presets::{all_rules, minimal_rules, recommended_rules, select_rules, Preset};
pub use procedure_test_inheritance::ProcedureTestInheritance;
pub use required_attributes::RequiredAttributes;

/// Re-export core types for convenience.
pub use procedure_lint_core::{Rule, Severity, Violation};
