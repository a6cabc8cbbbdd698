//! Test-class classification.

use crate::names;

/// Decides whether a class is a test class.
pub trait TestClassifier: Send + Sync {
    /// Returns `true` if the fully qualified class name denotes a test class.
    fn is_test_class(&self, qualified_name: &str) -> bool;
}

/// Classifies test classes by the suffix of their short name.
#[derive(Debug, Clone)]
pub struct SuffixTestClassifier {
    suffixes: Vec<String>,
}

impl Default for SuffixTestClassifier {
    fn default() -> Self {
        Self::new(["Test"])
    }
}

impl SuffixTestClassifier {
    /// Creates a classifier accepting any of the given suffixes.
    #[must_use]
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl TestClassifier for SuffixTestClassifier {
    fn is_test_class(&self, qualified_name: &str) -> bool {
        let short = names::short_name(qualified_name);
        self.suffixes
            .iter()
            .any(|s| short.len() > s.len() && short.ends_with(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_classification() {
        let c = SuffixTestClassifier::default();
        assert!(c.is_test_class("App\\Tests\\UserProcedureTest"));
        assert!(!c.is_test_class("App\\Tests\\RegularClassWithCoversClass"));
        assert!(!c.is_test_class("App\\Test"));
    }

    #[test]
    fn test_custom_suffixes() {
        let c = SuffixTestClassifier::new(["Spec", "Test"]);
        assert!(c.is_test_class("UserProcedureSpec"));
        assert!(c.is_test_class("UserProcedureTest"));
        assert!(!c.is_test_class("UserProcedure"));
    }
}
