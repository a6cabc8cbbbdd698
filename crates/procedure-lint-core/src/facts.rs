//! Class facts shared by every rule.
//!
//! [`ClassFacts`] is the gate rules use to decide applicability. Anything it
//! cannot resolve through the reflection collaborator counts as "not
//! applicable".

use crate::config::Conventions;
use crate::model::{Annotation, ClassDeclaration, MethodSignature};
use crate::names;
use crate::reflection::Reflection;
use tracing::debug;

/// Answers structural questions about class declarations.
#[derive(Clone, Copy)]
pub struct ClassFacts<'a> {
    reflection: &'a dyn Reflection,
    conventions: &'a Conventions,
}

impl std::fmt::Debug for ClassFacts<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassFacts")
            .field("procedure_base", &self.conventions.procedure_base)
            .finish_non_exhaustive()
    }
}

impl<'a> ClassFacts<'a> {
    /// Creates a resolver over a reflection snapshot.
    #[must_use]
    pub fn new(reflection: &'a dyn Reflection, conventions: &'a Conventions) -> Self {
        Self {
            reflection,
            conventions,
        }
    }

    /// Returns `true` for concrete classes descending from the procedure base.
    ///
    /// Interfaces, traits, enums and abstract classes are never checkable.
    /// Fails closed when the base type or the class cannot be resolved.
    #[must_use]
    pub fn is_checkable_procedure(&self, class: &ClassDeclaration) -> bool {
        if !class.is_concrete_class() {
            return false;
        }

        self.is_subclass_of(&class.name, &self.conventions.procedure_base)
            .unwrap_or(false)
    }

    /// Tests whether `name` transitively extends `base`.
    ///
    /// Returns `None` when `name` cannot be resolved and `Some(false)` when
    /// `base` cannot be resolved.
    #[must_use]
    pub fn is_subclass_of(&self, name: &str, base: &str) -> Option<bool> {
        let facts = self.reflection.get_type(name)?;

        if !self.reflection.has_type(base) {
            debug!("Base type {base} is not resolvable");
            return Some(false);
        }

        Some(facts.is_subclass_of(base))
    }

    /// Returns every annotation named `qualified_name`, in declaration order.
    #[must_use]
    pub fn annotations<'c>(
        &self,
        class: &'c ClassDeclaration,
        qualified_name: &str,
    ) -> Vec<&'c Annotation> {
        class.annotations_named(qualified_name)
    }

    /// Returns `true` only if the direct parent of `class` is `target`.
    ///
    /// Inheriting through an intermediate class does not count.
    #[must_use]
    pub fn direct_parent_is(&self, class: &ClassDeclaration, target: &str) -> bool {
        let parent = match self.reflection.get_type(&class.name) {
            Some(facts) => facts.direct_parent().map(str::to_string),
            None => class.extends.clone(),
        };

        parent.is_some_and(|p| names::same_type(&p, target))
    }

    /// Finds a method declared on `class` or inherited by it.
    #[must_use]
    pub fn method<'c>(&self, class: &'c ClassDeclaration, name: &str) -> Option<&'c MethodSignature>
    where
        'a: 'c,
    {
        class
            .method(name)
            .or_else(|| self.reflection.get_method(&class.name, name))
    }

    /// Returns the reflection collaborator.
    #[must_use]
    pub fn reflection(&self) -> &'a dyn Reflection {
        self.reflection
    }

    /// Returns the conventions in effect.
    #[must_use]
    pub fn conventions(&self) -> &'a Conventions {
        self.conventions
    }
}
