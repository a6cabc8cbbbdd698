//! Narrowing a declared parameter type to its concrete capability type.

use crate::model::TypeRef;
use crate::names;
use crate::reflection::Reflection;
use tracing::debug;

/// Finds the member of `declared` that implements `capability`.
///
/// Members are scanned in declaration order. The capability interface itself
/// is never a candidate, and members that cannot be resolved are skipped.
/// Returns the canonical name of the first match.
#[must_use]
pub fn narrow_to_capability(
    reflection: &dyn Reflection,
    declared: &TypeRef,
    capability: &str,
) -> Option<String> {
    for member in declared.members() {
        if names::same_type(member, capability) {
            continue;
        }

        let Some(facts) = reflection.get_type(member) else {
            debug!("Skipping unresolved type {member}");
            continue;
        };

        if facts.implements_capability(capability) {
            return Some(facts.name);
        }
    }

    None
}
