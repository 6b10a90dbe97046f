//! Graph splitting for consanguineous unions
//!
//! A union between two people who share an ancestor closes a loop in the
//! family graph. The splitter breaks the loop by giving the union its own
//! stand-in ("shadow") person, so that every remaining path through the
//! graph is a tree walk.
//!
//! For a couple ordered as `(person1, person2)`:
//!
//! ```text
//!   before                          after
//!
//!   person1 ── person2              person1 ── dup2         person2 ── dup1
//!        \      /                      \      /
//!        children                      children
//! ```
//!
//! `dup2` takes over person2's role in the union: the shared children point
//! at it and person1's spouse entry is rewired to it. person2 keeps its own
//! ancestry and every other union, with its child list hidden. When person2
//! listed person1 as a spouse, the union is mirrored on person2's side by
//! `dup1`, which carries no further relations.

use crate::graph::{replace_id, People, Person, PersonId};
use serde::Serialize;
use tracing::{debug, info};

/// Record of one resolved union
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Partner kept in place
    pub person1: PersonId,
    /// Partner replaced within the union
    pub person2: PersonId,
    /// Stand-in for person2 inside the union
    pub shadow2: PersonId,
    /// Mirror entry on person2's spouse list, when person2 recorded the union
    pub shadow1: Option<PersonId>,
    /// Children re-parented onto `shadow2`
    pub shared_children: Vec<PersonId>,
}

/// Splits consanguineous unions by inserting shadow persons
#[derive(Debug, Clone)]
pub struct GraphSplitter {
    separator: String,
}

impl GraphSplitter {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Resolve the union between `a` and `b`.
    ///
    /// Returns `None`, leaving the graph untouched, when either id is
    /// unknown or both name the same person.
    pub fn split(&self, people: &mut People, a: &PersonId, b: &PersonId) -> Option<Resolution> {
        if a == b {
            return None;
        }
        let (person1, person2) = {
            let (first, second) = order_pair(people.get(a)?, people.get(b)?);
            (first.clone(), second.clone())
        };

        let shared: Vec<PersonId> = person2
            .children
            .iter()
            .filter(|child| person1.children.contains(child))
            .cloned()
            .collect();

        let shadow2_id = people.fresh_id(&person2.id, &self.separator);
        let mut shadow2 = person2.shadow(shadow2_id.clone());
        shadow2.parents_hidden = true;
        shadow2.children = shared.clone();
        shadow2.spouses = vec![person1.id.clone()];

        for child in &shared {
            if let Some(child) = people.get_mut(child) {
                replace_id(&mut child.parents, &person2.id, &shadow2_id);
            }
        }

        let mirrored = person2.spouses.contains(&person1.id);
        if let Some(p2) = people.get_mut(&person2.id) {
            p2.children.retain(|child| !shared.contains(child));
            p2.children_hidden = true;
            p2.spouses.retain(|spouse| *spouse != person1.id);
        }
        if let Some(p1) = people.get_mut(&person1.id) {
            replace_id(&mut p1.spouses, &person2.id, &shadow2_id);
        }
        people.insert(shadow2);

        let shadow1 = if mirrored {
            let shadow1_id = people.fresh_id(&person1.id, &self.separator);
            let mut shadow1 = person1.shadow(shadow1_id.clone());
            shadow1.parents_hidden = true;
            shadow1.children_hidden = true;
            shadow1.spouses = vec![person2.id.clone()];
            if let Some(p2) = people.get_mut(&person2.id) {
                p2.spouses.push(shadow1_id.clone());
            }
            people.insert(shadow1);
            Some(shadow1_id)
        } else {
            debug!(person1 = %person1.id, person2 = %person2.id, "union recorded on one side only; no mirror");
            None
        };

        info!(
            person1 = person1.name(),
            person2 = person2.name(),
            shared_children = shared.len(),
            "resolved consanguineous union"
        );

        Some(Resolution {
            person1: person1.id,
            person2: person2.id,
            shadow2: shadow2_id,
            shadow1,
            shared_children: shared,
        })
    }
}

/// Deterministic order of a couple: by display name, then id
fn order_pair<'p>(a: &'p Person, b: &'p Person) -> (&'p Person, &'p Person) {
    if (a.name(), &a.id) <= (b.name(), &b.id) {
        (a, b)
    } else {
        (b, a)
    }
}
