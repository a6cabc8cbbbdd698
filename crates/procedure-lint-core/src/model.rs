//! Parsed class declarations as handed over by the source parser.
//!
//! The parser serializes one [`SourceFile`] per analyzed source file. All
//! names in it are fully qualified.

use crate::names;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// A regular class.
    #[default]
    Class,
    /// An interface.
    Interface,
    /// A trait.
    Trait,
    /// An enum.
    Enum,
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Trait => write!(f, "trait"),
            Self::Enum => write!(f, "enum"),
        }
    }
}

/// Value of an annotation argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgValue {
    /// A string literal, already unescaped.
    String(String),
    /// A class constant reference (`Foo::class`), holding the qualified class name.
    ClassConst(String),
    /// Any other expression, as raw source text.
    Expr(String),
}

impl ArgValue {
    /// Returns the literal string value, if this is a string literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the referenced class name, if this is a class constant.
    #[must_use]
    pub fn as_class_const(&self) -> Option<&str> {
        match self {
            Self::ClassConst(s) => Some(s),
            _ => None,
        }
    }
}

/// A single annotation argument, positional or named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name for named arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Argument value.
    pub value: ArgValue,
}

impl Argument {
    /// Creates a positional argument.
    #[must_use]
    pub fn positional(value: ArgValue) -> Self {
        Self { name: None, value }
    }

    /// Creates a named argument.
    #[must_use]
    pub fn named(name: impl Into<String>, value: ArgValue) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

/// A declarative metadata annotation attached to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully qualified annotation name.
    pub name: String,
    /// Arguments in declaration order.
    #[serde(default)]
    pub args: Vec<Argument>,
    /// Line of the annotation (1-indexed).
    #[serde(default = "default_line")]
    pub line: usize,
}

impl Annotation {
    /// Creates an annotation without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            line,
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    /// Returns `true` if this annotation has the given qualified name.
    #[must_use]
    pub fn is(&self, qualified_name: &str) -> bool {
        names::same_type(&self.name, qualified_name)
    }

    /// Returns `true` if any argument is passed by name.
    #[must_use]
    pub fn uses_named_args(&self) -> bool {
        self.args.iter().any(|a| a.name.is_some())
    }

    /// Finds the argument bound to parameter `name`.
    ///
    /// A named argument `name` wins. When no argument is named at all, the
    /// positional argument at `position` is used instead.
    #[must_use]
    pub fn argument(&self, name: &str, position: usize) -> Option<&Argument> {
        if let Some(arg) = self
            .args
            .iter()
            .find(|a| a.name.as_deref() == Some(name))
        {
            return Some(arg);
        }

        if self.uses_named_args() {
            return None;
        }

        self.args.get(position)
    }
}

/// Declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    /// A single named type.
    Named(String),
    /// A union of named types, in declaration order.
    Union(Vec<String>),
}

impl TypeRef {
    /// Returns the member type names in declaration order.
    #[must_use]
    pub fn members(&self) -> Vec<&str> {
        match self {
            Self::Named(name) => vec![name.as_str()],
            Self::Union(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Returns `true` for union types.
    #[must_use]
    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Union(names) => write!(f, "{}", names.join("|")),
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name without the `$` sigil.
    pub name: String,
    /// Native declared type, if any.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<TypeRef>,
}

/// A method signature with its documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Method name.
    pub name: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Raw doc comment, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Line of the method declaration (1-indexed).
    #[serde(default = "default_line")]
    pub line: usize,
}

impl MethodSignature {
    /// Returns the first parameter, if any.
    #[must_use]
    pub fn first_param(&self) -> Option<&Parameter> {
        self.params.first()
    }
}

/// A type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// Fully qualified name.
    pub name: String,
    /// Declaration kind.
    #[serde(default)]
    pub kind: ClassKind,
    /// Whether the class is declared abstract.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Declared parent class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Implemented interfaces; for interfaces, the extended interfaces.
    #[serde(default)]
    pub implements: Vec<String>,
    /// Attached annotations in declaration order.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Declared methods.
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
    /// Line where the declaration starts, including its annotations.
    #[serde(default = "default_line")]
    pub line: usize,
}

impl ClassDeclaration {
    /// Creates an empty concrete class declaration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            is_abstract: false,
            extends: None,
            implements: Vec::new(),
            annotations: Vec::new(),
            methods: Vec::new(),
            line: default_line(),
        }
    }

    /// Returns the short (unqualified) name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        names::short_name(&self.name)
    }

    /// Returns `true` for classes that are neither abstract nor another kind.
    #[must_use]
    pub fn is_concrete_class(&self) -> bool {
        self.kind == ClassKind::Class && !self.is_abstract
    }

    /// Returns every annotation with the given qualified name, in declaration order.
    #[must_use]
    pub fn annotations_named(&self, qualified_name: &str) -> Vec<&Annotation> {
        self.annotations
            .iter()
            .filter(|a| a.is(qualified_name))
            .collect()
    }

    /// Returns `true` if at least one annotation has the given name.
    #[must_use]
    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations.iter().any(|a| a.is(qualified_name))
    }

    /// Finds a method declared directly on this class.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

/// Parsed declarations of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path of the original source file, relative to the project root.
    /// Defaults to the snapshot's own path when absent.
    #[serde(default)]
    pub path: PathBuf,
    /// Declarations in source order.
    #[serde(default)]
    pub classes: Vec<ClassDeclaration>,
}

impl SourceFile {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the snapshot format.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

fn default_line() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expose(args: Vec<Argument>) -> Annotation {
        let mut a = Annotation::new("App\\MethodExpose", 3);
        a.args = args;
        a
    }

    #[test]
    fn test_named_argument_wins() {
        let a = expose(vec![
            Argument::named("description", ArgValue::String("x".into())),
            Argument::named("method", ArgValue::String("user_create".into())),
        ]);
        let arg = a.argument("method", 0).unwrap();
        assert_eq!(arg.value.as_literal(), Some("user_create"));
    }

    #[test]
    fn test_positional_used_without_named_args() {
        let a = expose(vec![Argument::positional(ArgValue::String(
            "user.delete".into(),
        ))]);
        assert_eq!(
            a.argument("method", 0).and_then(|a| a.value.as_literal()),
            Some("user.delete")
        );
    }

    #[test]
    fn test_positional_ignored_when_other_args_are_named() {
        let a = expose(vec![
            Argument::positional(ArgValue::String("user.delete".into())),
            Argument::named("description", ArgValue::String("x".into())),
        ]);
        assert!(a.argument("method", 0).is_none());
    }

    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "path": "src/UserProcedure.php",
            "classes": [{
                "name": "App\\UserProcedure",
                "extends": "Base\\BaseProcedure",
                "line": 7,
                "annotations": [{
                    "name": "App\\MethodExpose",
                    "line": 7,
                    "args": [{"name": "method", "value": {"kind": "string", "value": "user.create"}}]
                }],
                "methods": [{
                    "name": "execute",
                    "params": [{"name": "param", "type": ["App\\TestParam", "App\\RpcParamInterface"]}]
                }]
            }]
        }"#;

        let file = SourceFile::from_json(json).unwrap();
        let class = &file.classes[0];
        assert_eq!(class.kind, ClassKind::Class);
        assert!(!class.is_abstract);
        assert_eq!(class.short_name(), "UserProcedure");
        assert_eq!(class.annotations_named("\\App\\MethodExpose").len(), 1);

        let execute = class.method("Execute").unwrap();
        let ty = execute.first_param().unwrap().declared_type.as_ref().unwrap();
        assert!(ty.is_union());
        assert_eq!(ty.members(), vec!["App\\TestParam", "App\\RpcParamInterface"]);
        assert_eq!(execute.line, 1);
    }

    #[test]
    fn test_deserialize_single_type_and_kinds() {
        let json = r#"{"name": "App\\Foo", "kind": "interface", "methods": [
            {"name": "execute", "params": [{"name": "p", "type": "App\\Bar"}, {"name": "q"}]}
        ]}"#;
        let class: ClassDeclaration = serde_json::from_str(json).unwrap();
        assert_eq!(class.kind, ClassKind::Interface);
        let params = &class.methods[0].params;
        assert_eq!(params[0].declared_type, Some(TypeRef::Named("App\\Bar".into())));
        assert!(params[1].declared_type.is_none());
    }
}
