//! Ancestor enumeration by walking parent edges upward

use crate::graph::{Ancestor, People, PersonId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Generation cap used when none is configured
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Result of an ancestor walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorWalk {
    /// Ancestors in depth-first order. The same id may appear more than
    /// once, at different generations, when two lines of descent meet.
    pub ancestors: Vec<Ancestor>,
    /// Parents skipped because they were already open on the current path
    pub cycles: Vec<PersonId>,
}

/// Query for the ancestors of one person
#[derive(Debug, Clone)]
pub struct AncestorQuery {
    /// Person whose ancestry is walked
    pub origin: PersonId,
    /// Deepest generation emitted (1 = parents only)
    pub max_depth: usize,
}

impl AncestorQuery {
    /// Create a query starting at a person
    pub fn from(origin: PersonId) -> Self {
        Self {
            origin,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the generation cap
    pub fn depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Walk the ancestry and return the ancestors only
    pub fn execute(&self, people: &People) -> Vec<Ancestor> {
        self.walk(people).ancestors
    }

    /// Walk the ancestry, reporting cycle dead ends alongside the result.
    ///
    /// A parent that is a shadow is emitted under its own id; the walk then
    /// continues through the parents of the person it stands in for. A
    /// parent already open on the current path is a dead end: it is neither
    /// emitted nor followed, so the origin never appears in its own
    /// ancestry.
    pub fn walk(&self, people: &People) -> AncestorWalk {
        let mut walk = AncestorWalk::default();
        if !people.contains(&self.origin) {
            return walk;
        }

        let mut open: HashSet<PersonId> = HashSet::new();
        open.insert(self.origin.clone());
        open.insert(people.canonical_id(&self.origin).clone());

        self.visit(people, &self.origin, 1, &mut open, &mut walk);
        walk
    }

    fn visit(
        &self,
        people: &People,
        current: &PersonId,
        generation: usize,
        open: &mut HashSet<PersonId>,
        walk: &mut AncestorWalk,
    ) {
        if generation > self.max_depth {
            debug!(origin = %self.origin, at = %current, "ancestor walk hit depth cap");
            return;
        }
        let Some(person) = people.get(current) else {
            return;
        };

        for parent in &person.parents {
            let lineage = people.canonical_id(parent);
            if open.contains(parent) || open.contains(lineage) {
                warn!(origin = %self.origin, child = %current, parent = %parent, "parent cycle; treating as dead end");
                walk.cycles.push(parent.clone());
                continue;
            }

            walk.ancestors.push(Ancestor::new(parent.clone(), generation));

            let newly_opened: Vec<PersonId> = [parent, lineage]
                .into_iter()
                .filter(|id| open.insert((*id).clone()))
                .cloned()
                .collect();
            self.visit(people, lineage, generation + 1, open, walk);
            for id in &newly_opened {
                open.remove(id);
            }
        }
    }
}

/// Ancestors of `origin`, capped at `max_depth` generations
pub fn ancestors_of(people: &People, origin: &PersonId, max_depth: usize) -> Vec<Ancestor> {
    AncestorQuery::from(origin.clone()).depth(max_depth).execute(people)
}
