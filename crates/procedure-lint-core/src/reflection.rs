//! Reflection over the loaded declarations.
//!
//! Rules never look at live types. Everything they need about inheritance
//! is answered by a [`Reflection`] implementation; [`ReflectionIndex`] is the
//! in-memory one built from every loaded snapshot.

use crate::model::{ClassDeclaration, ClassKind, MethodSignature};
use crate::names;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Resolved inheritance facts about one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFacts {
    /// Canonical fully qualified name, as declared.
    pub name: String,
    /// Declaration kind.
    pub kind: ClassKind,
    /// Whether the type is abstract.
    pub is_abstract: bool,
    /// Ancestors from direct parent to root.
    pub ancestors: Vec<String>,
    /// Every interface implemented, directly or through ancestors.
    pub interfaces: Vec<String>,
}

impl TypeFacts {
    /// Returns the ancestor chain, direct parent first.
    #[must_use]
    pub fn ancestor_chain(&self) -> &[String] {
        &self.ancestors
    }

    /// Returns the direct parent, if any.
    #[must_use]
    pub fn direct_parent(&self) -> Option<&str> {
        self.ancestors.first().map(String::as_str)
    }

    /// Returns `true` if `other` appears anywhere in the ancestor chain.
    ///
    /// A type is not a subclass of itself.
    #[must_use]
    pub fn is_subclass_of(&self, other: &str) -> bool {
        self.ancestors.iter().any(|a| names::same_type(a, other))
    }

    /// Returns `true` if the type implements the interface `name`.
    #[must_use]
    pub fn implements_capability(&self, name: &str) -> bool {
        self.interfaces.iter().any(|i| names::same_type(i, name))
    }
}

/// Read-only type lookups shared by all rules.
///
/// Implementations must be safe for concurrent reads; the analyzer queries
/// one instance from several threads.
pub trait Reflection: Send + Sync {
    /// Returns `true` if the type can be resolved.
    fn has_type(&self, name: &str) -> bool;

    /// Resolves a type, or `None` if it is unknown.
    fn get_type(&self, name: &str) -> Option<TypeFacts>;

    /// Finds a method on `class` or, failing that, on its ancestors.
    fn get_method(&self, class: &str, method: &str) -> Option<&MethodSignature>;
}

/// In-memory [`Reflection`] over a set of declarations.
#[derive(Debug, Clone, Default)]
pub struct ReflectionIndex {
    types: HashMap<String, ClassDeclaration>,
}

impl ReflectionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from declarations. Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_declarations<'a, I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassDeclaration>,
    {
        let mut index = Self::new();
        for decl in declarations {
            index.insert(decl.clone());
        }
        index
    }

    /// Adds a declaration.
    pub fn insert(&mut self, declaration: ClassDeclaration) {
        let key = names::index_key(&declaration.name);
        if self.types.insert(key, declaration).is_some() {
            debug!("Duplicate type declaration replaced");
        }
    }

    /// Adds a declaration, builder style.
    #[must_use]
    pub fn with(mut self, declaration: ClassDeclaration) -> Self {
        self.insert(declaration);
        self
    }

    /// Number of indexed types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn lookup(&self, name: &str) -> Option<&ClassDeclaration> {
        self.types.get(&names::index_key(name))
    }

    /// Walks `extends` links. Stops at the first unresolved parent, which is
    /// still reported, and at cycles.
    fn ancestors_of(&self, decl: &ClassDeclaration) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(names::index_key(&decl.name));

        let mut next = decl.extends.as_deref();
        while let Some(parent) = next {
            if !seen.insert(names::index_key(parent)) {
                debug!("Inheritance cycle at {parent}");
                break;
            }
            match self.lookup(parent) {
                Some(parent_decl) => {
                    chain.push(parent_decl.name.clone());
                    next = parent_decl.extends.as_deref();
                }
                None => {
                    chain.push(names::normalize(parent).to_string());
                    next = None;
                }
            }
        }

        chain
    }

    /// Collects interfaces of the type and its ancestors, following
    /// interface inheritance.
    fn interfaces_of(&self, decl: &ClassDeclaration, ancestors: &[String]) -> Vec<String> {
        let mut pending: Vec<String> = decl.implements.clone();
        for ancestor in ancestors {
            if let Some(a) = self.lookup(ancestor) {
                pending.extend(a.implements.iter().cloned());
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut result = Vec::new();
        while let Some(name) = pending.pop() {
            if !seen.insert(names::index_key(&name)) {
                continue;
            }
            match self.lookup(&name) {
                Some(iface) => {
                    pending.extend(iface.implements.iter().cloned());
                    result.push(iface.name.clone());
                }
                None => result.push(names::normalize(&name).to_string()),
            }
        }

        result
    }
}

impl Reflection for ReflectionIndex {
    fn has_type(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn get_type(&self, name: &str) -> Option<TypeFacts> {
        let decl = self.lookup(name)?;
        let ancestors = self.ancestors_of(decl);
        let interfaces = self.interfaces_of(decl, &ancestors);

        Some(TypeFacts {
            name: decl.name.clone(),
            kind: decl.kind,
            is_abstract: decl.is_abstract,
            ancestors,
            interfaces,
        })
    }

    fn get_method(&self, class: &str, method: &str) -> Option<&MethodSignature> {
        let decl = self.lookup(class)?;
        if let Some(m) = decl.method(method) {
            return Some(m);
        }

        self.ancestors_of(decl)
            .iter()
            .filter_map(|a| self.lookup(a))
            .find_map(|a| a.method(method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, TypeRef};

    fn class(name: &str, extends: Option<&str>, implements: &[&str]) -> ClassDeclaration {
        let mut c = ClassDeclaration::new(name);
        c.extends = extends.map(String::from);
        c.implements = implements.iter().map(|s| (*s).to_string()).collect();
        c
    }

    fn interface(name: &str, extends: &[&str]) -> ClassDeclaration {
        let mut c = class(name, None, extends);
        c.kind = ClassKind::Interface;
        c
    }

    fn index() -> ReflectionIndex {
        let mut base = class("Rpc\\BaseProcedure", None, &["Rpc\\ProcedureInterface"]);
        base.is_abstract = true;
        base.methods.push(MethodSignature {
            name: "execute".into(),
            params: vec![Parameter {
                name: "param".into(),
                declared_type: Some(TypeRef::Named("Rpc\\RpcParamInterface".into())),
            }],
            doc: None,
            line: 10,
        });

        ReflectionIndex::new()
            .with(base)
            .with(interface("Rpc\\ProcedureInterface", &["Rpc\\Marker"]))
            .with(class("App\\Middle", Some("Rpc\\BaseProcedure"), &[]))
            .with(class("App\\Leaf", Some("\\App\\Middle"), &[]))
            .with(class("App\\Orphan", Some("Vendor\\Missing"), &[]))
            .with(class("App\\A", Some("App\\B"), &[]))
            .with(class("App\\B", Some("App\\A"), &[]))
    }

    #[test]
    fn test_ancestor_chain_is_ordered() {
        let facts = index().get_type("app\\leaf").unwrap();
        assert_eq!(facts.name, "App\\Leaf");
        assert_eq!(
            facts.ancestor_chain(),
            &["App\\Middle".to_string(), "Rpc\\BaseProcedure".to_string()]
        );
        assert_eq!(facts.direct_parent(), Some("App\\Middle"));
        assert!(facts.is_subclass_of("Rpc\\BaseProcedure"));
        assert!(!facts.is_subclass_of("App\\Leaf"));
    }

    #[test]
    fn test_interfaces_are_inherited_transitively() {
        let facts = index().get_type("App\\Leaf").unwrap();
        assert!(facts.implements_capability("Rpc\\ProcedureInterface"));
        assert!(facts.implements_capability("\\Rpc\\Marker"));
        assert!(!facts.implements_capability("Rpc\\RpcParamInterface"));
    }

    #[test]
    fn test_unresolved_parent_ends_chain() {
        let facts = index().get_type("App\\Orphan").unwrap();
        assert_eq!(facts.ancestor_chain(), &["Vendor\\Missing".to_string()]);
    }

    #[test]
    fn test_cycle_terminates() {
        let facts = index().get_type("App\\A").unwrap();
        assert_eq!(facts.ancestor_chain(), &["App\\B".to_string()]);
    }

    #[test]
    fn test_unknown_type() {
        let idx = index();
        assert!(!idx.has_type("App\\Nope"));
        assert!(idx.get_type("App\\Nope").is_none());
    }

    #[test]
    fn test_get_method_walks_ancestors() {
        let idx = index();
        let m = idx.get_method("App\\Leaf", "EXECUTE").unwrap();
        assert_eq!(m.line, 10);
        assert!(idx.get_method("App\\Leaf", "missing").is_none());
    }
}
