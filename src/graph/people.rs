//! People: the process-wide person collection

use super::person::{Person, PersonId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Ordered person collection with an identifier index.
///
/// Iteration follows insertion order, so every pass over the collection is
/// deterministic. Persons are only ever appended, never removed.
#[derive(Debug, Clone, Default)]
pub struct People {
    persons: Vec<Person>,
    index: HashMap<PersonId, usize>,
}

impl People {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a person.
    ///
    /// Returns `false` and leaves the collection untouched when the id is
    /// already taken.
    pub fn insert(&mut self, person: Person) -> bool {
        if self.index.contains_key(&person.id) {
            return false;
        }
        self.index.insert(person.id.clone(), self.persons.len());
        self.persons.push(person);
        true
    }

    /// Get a person by id
    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.index.get(id).map(|&i| &self.persons[i])
    }

    /// Get a mutable reference to a person
    pub fn get_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        match self.index.get(id) {
            Some(&i) => self.persons.get_mut(i),
            None => None,
        }
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.index.contains_key(id)
    }

    /// All persons in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.persons.iter()
    }

    /// Snapshot of every id in insertion order
    pub fn ids(&self) -> Vec<PersonId> {
        self.persons.iter().map(|p| p.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Derive an unused id from `base` by appending `separator` and a
    /// counter, trying 1, 2, ... until no person holds the candidate.
    pub fn fresh_id(&self, base: &PersonId, separator: &str) -> PersonId {
        let mut counter = 1;
        loop {
            let candidate = base.with_suffix(separator, counter);
            if !self.contains(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// The person a shadow stands in for; the id itself for everyone else.
    ///
    /// Chains of shadows are followed to their end, stopping if a chain
    /// loops back on itself.
    pub fn canonical_id<'a>(&'a self, id: &'a PersonId) -> &'a PersonId {
        let mut current = id;
        let mut seen: HashSet<&PersonId> = HashSet::new();
        while let Some(target) = self.get(current).and_then(|p| p.redirects_to.as_ref()) {
            if !seen.insert(current) {
                break;
            }
            current = target;
        }
        current
    }

    /// Drop parent, spouse and child references that do not resolve to a
    /// person in this collection. Returns how many references were dropped.
    ///
    /// Records often point at people outside the extracted subset; such a
    /// reference is an absent edge, not an error.
    pub fn retain_resolvable_edges(&mut self) -> usize {
        let known: HashSet<PersonId> = self.index.keys().cloned().collect();
        let mut dropped = 0;

        for person in &mut self.persons {
            for (label, ids) in [
                ("parent", &mut person.parents),
                ("spouse", &mut person.spouses),
                ("child", &mut person.children),
            ] {
                let before = ids.len();
                ids.retain(|id| {
                    let ok = known.contains(id);
                    if !ok {
                        debug!(person = %person.id, missing = %id, relation = label, "dropping unresolved reference");
                    }
                    ok
                });
                dropped += before - ids.len();
            }
        }

        dropped
    }
}

impl<'a> IntoIterator for &'a People {
    type Item = &'a Person;
    type IntoIter = std::slice::Iter<'a, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.persons.iter()
    }
}

impl FromIterator<Person> for People {
    /// Collect persons, skipping any whose id is already present
    fn from_iter<I: IntoIterator<Item = Person>>(iter: I) -> Self {
        let mut people = Self::new();
        for person in iter {
            people.insert(person);
        }
        people
    }
}
