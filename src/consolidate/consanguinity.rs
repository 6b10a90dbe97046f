//! Shared-ancestry detection between two partners

use crate::graph::{Ancestor, People, PersonId};
use std::collections::HashSet;

/// Whether two ancestor sequences share at least one person.
///
/// Duplicates within one side never count as a match; only an id present
/// on both sides does. Shadow ids are compared by the person they stand
/// in for. An empty side shares nothing.
pub fn ancestors_shared(people: &People, a: &[Ancestor], b: &[Ancestor]) -> bool {
    let left = distinct(people, a);
    let right = distinct(people, b);
    if left.is_empty() || right.is_empty() {
        return false;
    }

    let mut seen: HashSet<&PersonId> = HashSet::with_capacity(left.len() + right.len());
    seen.extend(left);
    right.into_iter().any(|id| !seen.insert(id))
}

fn distinct<'a>(people: &'a People, ancestors: &'a [Ancestor]) -> HashSet<&'a PersonId> {
    ancestors
        .iter()
        .map(|a| people.canonical_id(&a.id))
        .collect()
}
