//! # procedure-lint-core
//!
//! Core framework for checking JSON-RPC procedure conventions over class
//! declaration snapshots.
//!
//! This crate provides the foundational traits and types for building
//! convention rules. It includes:
//!
//! - [`Rule`] trait for per-class rules
//! - [`Reflection`] and [`ReflectionIndex`] for resolving type hierarchies
//! - [`ClassFacts`] for the structural questions rules share
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use procedure_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./build/snapshots")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for violation in &result.violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod classify;
mod config;
mod context;
mod facts;
mod model;
mod reflection;
mod rule;
mod types;

/// Type directive parsing for doc comments.
pub mod doc_type;
/// Qualified class name helpers.
pub mod names;
/// Capability narrowing over declared parameter types.
pub mod narrowing;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use classify::{SuffixTestClassifier, TestClassifier};
pub use config::{AnalyzerConfig, Config, ConfigError, Conventions, RuleConfig};
pub use context::FileContext;
pub use facts::ClassFacts;
pub use model::{
    Annotation, ArgValue, Argument, ClassDeclaration, ClassKind, MethodSignature, Parameter,
    SourceFile, TypeRef,
};
pub use reflection::{Reflection, ReflectionIndex, TypeFacts};
pub use rule::{Rule, RuleBox};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
