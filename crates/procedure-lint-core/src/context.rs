//! Context types for rule execution.

use crate::classify::TestClassifier;
use crate::config::Conventions;
use crate::facts::ClassFacts;
use crate::reflection::Reflection;
use crate::types::Location;
use std::path::Path;

/// Context provided to rules for one analyzed file.
///
/// Everything in it is read-only and shared across the classes of the file.
#[derive(Clone, Copy)]
pub struct FileContext<'a> {
    /// Path of the analyzed source file.
    pub path: &'a Path,
    /// Reflection snapshot of the whole analysis.
    pub reflection: &'a dyn Reflection,
    /// Test-class classifier.
    pub tests: &'a dyn TestClassifier,
    /// Framework conventions.
    pub conventions: &'a Conventions,
}

impl std::fmt::Debug for FileContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileContext")
            .field("path", &self.path)
            .field("conventions", &self.conventions)
            .finish_non_exhaustive()
    }
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(
        path: &'a Path,
        reflection: &'a dyn Reflection,
        tests: &'a dyn TestClassifier,
        conventions: &'a Conventions,
    ) -> Self {
        Self {
            path,
            reflection,
            tests,
            conventions,
        }
    }

    /// Returns the class facts resolver for this context.
    #[must_use]
    pub fn facts(&self) -> ClassFacts<'a> {
        ClassFacts::new(self.reflection, self.conventions)
    }

    /// Returns a location at `line` in this file.
    #[must_use]
    pub fn location(&self, line: usize) -> Location {
        Location::at_line(self.path.to_path_buf(), line)
    }
}
