//! Type-name normalization.
//!
//! Class names coming from the parser are fully qualified and may carry a
//! leading namespace separator. Names are compared case-insensitively, the
//! same way the analyzed language resolves them.

/// Namespace separator used in qualified names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Strips any leading namespace separators.
#[must_use]
pub fn normalize(name: &str) -> &str {
    name.trim_start_matches(NAMESPACE_SEPARATOR)
}

/// Returns the last segment of a qualified name.
#[must_use]
pub fn short_name(name: &str) -> &str {
    let name = normalize(name);
    name.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(name)
}

/// Returns `true` if both names refer to the same type.
#[must_use]
pub fn same_type(a: &str, b: &str) -> bool {
    normalize(a).eq_ignore_ascii_case(normalize(b))
}

/// Returns the key used to index a type by name.
#[must_use]
pub fn index_key(name: &str) -> String {
    normalize(name).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("App\\Param\\TestParam"), "TestParam");
        assert_eq!(short_name("\\App\\Param\\TestParam"), "TestParam");
        assert_eq!(short_name("TestParam"), "TestParam");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn test_same_type_ignores_leading_separator_and_case() {
        assert!(same_type("\\App\\TestParam", "app\\testparam"));
        assert!(!same_type("App\\TestParam", "TestParam"));
    }

    #[test]
    fn test_index_key() {
        assert_eq!(index_key("\\\\App\\Foo"), "app\\foo");
    }
}
