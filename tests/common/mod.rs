//! Common test utilities for lineage integration tests
//!
//! Provides a family-tree builder that emits record text and invariant
//! checks over consolidated people.

pub mod invariants;
pub mod tree_builder;

#[allow(unused_imports)]
pub use invariants::{assert_no_child_lost, assert_shadow_shape, children_by_origin};
#[allow(unused_imports)]
pub use tree_builder::TreeBuilder;

use lineage::{People, Person, PersonId};

/// Look a person up, panicking with the id when absent
#[allow(dead_code)]
pub fn person<'a>(people: &'a People, id: &str) -> &'a Person {
    people
        .get(&PersonId::from(id))
        .unwrap_or_else(|| panic!("no person {id}"))
}

#[allow(dead_code)]
pub fn ids(raw: &[&str]) -> Vec<PersonId> {
    raw.iter().map(|&s| PersonId::from(s)).collect()
}
