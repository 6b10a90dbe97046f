//! Structural checks every consolidated graph must pass

use lineage::{People, PersonId};
use std::collections::{BTreeMap, BTreeSet};

/// Children grouped by the original person they belong to: a shadow's
/// children count towards the person it stands in for.
pub fn children_by_origin(people: &People) -> BTreeMap<PersonId, BTreeSet<PersonId>> {
    let mut grouped: BTreeMap<PersonId, BTreeSet<PersonId>> = BTreeMap::new();
    for p in people {
        let origin = people.canonical_id(&p.id).clone();
        grouped
            .entry(origin)
            .or_default()
            .extend(p.children.iter().cloned());
    }
    grouped
}

/// Every original person's children before consolidation are still
/// reachable through that person or one of its shadows, and no child
/// shows up under both.
pub fn assert_no_child_lost(before: &People, after: &People) {
    let grouped = children_by_origin(after);
    for p in before {
        let expected: BTreeSet<PersonId> = p.children.iter().cloned().collect();
        let actual = grouped.get(&p.id).cloned().unwrap_or_default();
        assert_eq!(actual, expected, "children of {} changed", p.id);

        let mut seen = BTreeSet::new();
        for holder in after.iter().filter(|h| after.canonical_id(&h.id) == &p.id) {
            for child in &holder.children {
                assert!(seen.insert(child.clone()), "{child} listed twice under {}", p.id);
            }
        }
    }
}

/// Shadows carry no ancestry, always hide their parents and point at an
/// original; originals never hide their parents.
pub fn assert_shadow_shape(people: &People) {
    for p in people {
        match &p.redirects_to {
            Some(target) => {
                let original = people
                    .get(target)
                    .unwrap_or_else(|| panic!("{} redirects to missing {target}", p.id));
                assert!(!original.redirects(), "{} redirects to another shadow", p.id);
                assert!(p.parents.is_empty(), "shadow {} has parents", p.id);
                assert!(p.ancestors.is_empty(), "shadow {} has ancestors", p.id);
                assert!(p.parents_hidden, "shadow {} shows parents", p.id);
                assert_eq!(p.names, original.names);
                assert_eq!(p.sex, original.sex);
            }
            None => assert!(!p.parents_hidden, "original {} hides parents", p.id),
        }
    }
}
