//! Type directives inside doc comments.
//!
//! A directive binds a declared type to a parameter:
//!
//! ```text
//! /**
//!  * @phpstan-param TestParam $param
//!  */
//! ```
//!
//! Matching is keyword specific and the parameter name is anchored on a word
//! boundary, so `$param` never matches `$params`. A malformed directive is
//! indistinguishable from an absent one.

use crate::names;
use regex::Regex;
use tracing::debug;

/// Extracts the type declared by `keyword` for parameter `param`.
///
/// `param` is given without the `$` sigil. Returns the raw type text of the
/// first matching directive.
#[must_use]
pub fn extract_directive(doc: &str, keyword: &str, param: &str) -> Option<String> {
    let pattern = format!(
        r"{}\s+(\S+)\s+\${}\b",
        regex::escape(keyword),
        regex::escape(param)
    );

    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            debug!("Invalid directive pattern {pattern}: {e}");
            return None;
        }
    };

    re.captures(doc)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Returns `true` if `declared` names `expected`, either fully qualified or
/// by its short name.
#[must_use]
pub fn matches_type(declared: &str, expected: &str) -> bool {
    let declared = names::normalize(declared);
    declared.eq_ignore_ascii_case(names::normalize(expected))
        || declared.eq_ignore_ascii_case(names::short_name(expected))
}

/// What the doc comment says about a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveLookup {
    /// No doc comment, or no directive of either kind.
    Missing,
    /// Only the generic directive is present.
    Generic {
        /// Declared type text.
        declared: String,
    },
    /// The narrow directive is present.
    Narrow {
        /// Declared type text.
        declared: String,
    },
}

/// Looks up the narrow directive for `param`, falling back to the generic one.
#[must_use]
pub fn lookup_directive(
    doc: Option<&str>,
    narrow_keyword: &str,
    generic_keyword: &str,
    param: &str,
) -> DirectiveLookup {
    let Some(doc) = doc else {
        return DirectiveLookup::Missing;
    };

    if let Some(declared) = extract_directive(doc, narrow_keyword, param) {
        return DirectiveLookup::Narrow { declared };
    }

    match extract_directive(doc, generic_keyword, param) {
        Some(declared) => DirectiveLookup::Generic { declared },
        None => DirectiveLookup::Missing,
    }
}
