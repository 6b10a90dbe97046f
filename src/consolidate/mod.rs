//! Consolidation: detect and resolve consanguineous unions
//!
//! One pass visits every person built from records, in collection order,
//! together with each of their spouses. Couples who share an ancestor are
//! split with a [`GraphSplitter`]. The pass ends by recomputing every
//! person's ancestors on the final graph.

mod ancestors;
mod consanguinity;
mod splitter;

pub use ancestors::{ancestors_of, AncestorQuery, AncestorWalk, DEFAULT_MAX_DEPTH};
pub use consanguinity::ancestors_shared;
pub use splitter::{GraphSplitter, Resolution};

use crate::config::LineageConfig;
use crate::graph::{Ancestor, People, PersonId};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// What a consolidation pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Distinct couples examined
    pub couples_checked: usize,
    pub resolutions: Vec<Resolution>,
    /// Ids at which an ancestor walk met a parent cycle
    pub cycles: Vec<PersonId>,
}

/// Runs the consolidation pass over a [`People`] collection
#[derive(Debug, Clone)]
pub struct Consolidator {
    max_depth: usize,
    splitter: GraphSplitter,
}

impl Default for Consolidator {
    fn default() -> Self {
        Self::new(&LineageConfig::default())
    }
}

impl Consolidator {
    pub fn new(config: &LineageConfig) -> Self {
        Self {
            max_depth: config.max_ancestor_depth,
            splitter: GraphSplitter::new(config.shadow_separator.clone()),
        }
    }

    /// Override the generation cap
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve every consanguineous union in `people`.
    ///
    /// Only persons present when the pass starts are visited. A spouse
    /// entry removed by an earlier resolution is skipped, and each
    /// unordered couple is examined at most once. Running the pass again
    /// on its own output resolves nothing new.
    pub fn run(&self, people: &mut People) -> ConsolidationReport {
        let mut report = ConsolidationReport::default();
        let mut cycles: BTreeSet<PersonId> = BTreeSet::new();
        let mut checked: HashSet<(PersonId, PersonId)> = HashSet::new();

        for id in people.ids() {
            let own = self.refresh(people, &id, &mut cycles);
            let spouses = people
                .get(&id)
                .map(|p| p.spouses.clone())
                .unwrap_or_default();

            for spouse in spouses {
                if spouse == id || !people.contains(&spouse) {
                    continue;
                }
                // Earlier resolutions may have rewired this list
                let still_linked = people
                    .get(&id)
                    .is_some_and(|p| p.spouses.contains(&spouse));
                if !still_linked || !checked.insert(couple_key(&id, &spouse)) {
                    continue;
                }
                report.couples_checked += 1;

                let theirs = self.refresh(people, &spouse, &mut cycles);
                if !ancestors_shared(people, &own, &theirs) {
                    continue;
                }
                debug!(person = %id, spouse = %spouse, "partners share an ancestor");
                if let Some(resolution) = self.splitter.split(people, &id, &spouse) {
                    report.resolutions.push(resolution);
                }
            }
        }

        self.refresh_all(people, &mut cycles);
        report.cycles = cycles.into_iter().collect();

        info!(
            people = people.len(),
            couples = report.couples_checked,
            resolved = report.resolutions.len(),
            "consolidation pass complete"
        );
        report
    }

    /// Recompute and store every person's ancestors, shadows included
    pub fn refresh_ancestors(&self, people: &mut People) {
        let mut cycles = BTreeSet::new();
        self.refresh_all(people, &mut cycles);
    }

    fn refresh_all(&self, people: &mut People, cycles: &mut BTreeSet<PersonId>) {
        for id in people.ids() {
            self.refresh(people, &id, cycles);
        }
    }

    fn refresh(
        &self,
        people: &mut People,
        id: &PersonId,
        cycles: &mut BTreeSet<PersonId>,
    ) -> Vec<Ancestor> {
        let walk = AncestorQuery::from(id.clone())
            .depth(self.max_depth)
            .walk(people);
        cycles.extend(walk.cycles);
        if let Some(person) = people.get_mut(id) {
            person.ancestors = walk.ancestors.clone();
        }
        walk.ancestors
    }
}

/// Unordered couple key
fn couple_key(a: &PersonId, b: &PersonId) -> (PersonId, PersonId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Run a consolidation pass with the given configuration
pub fn consolidate(people: &mut People, config: &LineageConfig) -> ConsolidationReport {
    Consolidator::new(config).run(people)
}
