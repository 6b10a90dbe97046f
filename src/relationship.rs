//! Kinship between two people, from their stored ancestor lists
//!
//! Run after consolidation: the calculator reads [`Person::ancestors`]
//! rather than walking the graph itself. Shadow ids, on either side or
//! inside an ancestor list, count as the person they stand in for.
//!
//! [`Person::ancestors`]: crate::graph::Person::ancestors

use crate::error::{LineageError, LineageResult};
use crate::graph::{People, Person, PersonId, Sex};
use std::collections::HashMap;

/// What person A is to person B
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    SamePerson,
    Siblings,
    /// `degree` 1 for first cousins; `removed` counts generations apart
    Cousins { degree: usize, removed: usize },
    /// A is B's parent (1), grandparent (2), ...
    Ancestor { generations: usize },
    /// A is B's child (1), grandchild (2), ...
    Descendant { generations: usize },
    /// A is a sibling of B's parent (`greats` 0) or of a further ancestor
    AuntUncle { greats: usize },
    /// A is a child (`greats` 0) or further descendant of B's sibling
    NieceNephew { greats: usize },
    Unrelated,
}

impl Relationship {
    /// Classify by generational distance of A and B from their least
    /// common ancestor
    pub fn from_generations(gen_a: usize, gen_b: usize) -> Self {
        match (gen_a, gen_b) {
            (0, 0) => Self::SamePerson,
            (1, 1) => Self::Siblings,
            (0, g) => Self::Ancestor { generations: g },
            (g, 0) => Self::Descendant { generations: g },
            (1, g) => Self::AuntUncle { greats: g - 2 },
            (g, 1) => Self::NieceNephew { greats: g - 2 },
            (a, b) => Self::Cousins {
                degree: a.min(b) - 1,
                removed: a.abs_diff(b),
            },
        }
    }

    /// English label for A, given A's sex
    pub fn label(&self, sex: Sex) -> String {
        let gendered = |male: &str, female: &str, neutral: &str| match sex {
            Sex::Male => male.to_string(),
            Sex::Female => female.to_string(),
            Sex::Unknown => neutral.to_string(),
        };

        match *self {
            Self::SamePerson => "same person".to_string(),
            Self::Unrelated => "no relation".to_string(),
            Self::Siblings => gendered("brother", "sister", "sibling"),
            Self::Ancestor { generations } => lineal(
                generations,
                gendered("father", "mother", "parent"),
                gendered("grandfather", "grandmother", "grandparent"),
            ),
            Self::Descendant { generations } => lineal(
                generations,
                gendered("son", "daughter", "child"),
                gendered("grandson", "granddaughter", "grandchild"),
            ),
            Self::AuntUncle { greats } => {
                format!("{}{}", great_prefix(greats), gendered("uncle", "aunt", "pibling"))
            }
            Self::NieceNephew { greats } => {
                format!("{}{}", great_prefix(greats), gendered("nephew", "niece", "nibling"))
            }
            Self::Cousins { degree, removed } => {
                let cousin = format!("{} cousin", ordinal(degree));
                match removed {
                    0 => cousin,
                    1 => format!("{cousin} once removed"),
                    2 => format!("{cousin} twice removed"),
                    n => format!("{cousin} {n} times removed"),
                }
            }
        }
    }
}

fn lineal(generations: usize, first: String, second: String) -> String {
    match generations {
        1 => first,
        g => format!("{}{second}", great_prefix(g - 2)),
    }
}

fn great_prefix(greats: usize) -> String {
    "great-".repeat(greats)
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Generation distances of everyone in a person's ancestry, the person
/// included at 0. Repeated ancestors keep their nearest generation.
fn lineage<'a>(people: &'a People, id: &'a PersonId) -> Vec<(&'a PersonId, usize)> {
    let Some(person) = people.get(id) else {
        return Vec::new();
    };
    std::iter::once((id, 0))
        .chain(
            person
                .ancestors
                .iter()
                .map(|a| (people.canonical_id(&a.id), a.generation)),
        )
        .collect()
}

/// The shared ancestor closest to both people, with each one's distance
/// to it. A person counts as their own ancestor at distance 0.
///
/// Among candidates with the same total distance the first one found in
/// A's ancestry wins.
pub fn least_common_ancestor(
    people: &People,
    a: &PersonId,
    b: &PersonId,
) -> Option<(PersonId, usize, usize)> {
    let a = people.canonical_id(a);
    let b = people.canonical_id(b);

    let mut nearest_b: HashMap<&PersonId, usize> = HashMap::new();
    for (id, generation) in lineage(people, b) {
        nearest_b
            .entry(id)
            .and_modify(|g| *g = (*g).min(generation))
            .or_insert(generation);
    }

    let mut best: Option<(&PersonId, usize, usize)> = None;
    for (id, gen_a) in lineage(people, a) {
        let Some(&gen_b) = nearest_b.get(id) else {
            continue;
        };
        let closer = best.map_or(true, |(_, ba, bb)| gen_a + gen_b < ba + bb);
        if closer {
            best = Some((id, gen_a, gen_b));
        }
    }
    best.map(|(id, ga, gb)| (id.clone(), ga, gb))
}

/// What `a` is to `b`. `None` when either id is unknown.
pub fn relationship(people: &People, a: &PersonId, b: &PersonId) -> Option<Relationship> {
    if !people.contains(a) || !people.contains(b) {
        return None;
    }
    Some(match least_common_ancestor(people, a, b) {
        Some((_, gen_a, gen_b)) => Relationship::from_generations(gen_a, gen_b),
        None => Relationship::Unrelated,
    })
}

/// Like [`relationship`], returning person `a` alongside the relation and
/// naming the first unknown id as an error.
pub fn relate<'a>(
    people: &'a People,
    a: &PersonId,
    b: &PersonId,
) -> LineageResult<(&'a Person, Relationship)> {
    for id in [a, b] {
        if !people.contains(id) {
            return Err(LineageError::PersonNotFound(id.to_string()));
        }
    }
    let person = people
        .get(a)
        .ok_or_else(|| LineageError::PersonNotFound(a.to_string()))?;
    let relation = relationship(people, a, b)
        .ok_or_else(|| LineageError::PersonNotFound(b.to_string()))?;
    Ok((person, relation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::Consolidator;

    /// ```text
    ///            G
    ///          /   \
    ///         P     U
    ///        / \     \
    ///       A   S     C
    ///       |         |
    ///       K         D
    /// ```
    fn pedigree() -> People {
        let links: &[(&str, Sex, &[&str])] = &[
            ("G", Sex::Male, &[]),
            ("P", Sex::Female, &["G"]),
            ("U", Sex::Male, &["G"]),
            ("A", Sex::Male, &["P"]),
            ("S", Sex::Female, &["P"]),
            ("C", Sex::Female, &["U"]),
            ("K", Sex::Male, &["A"]),
            ("D", Sex::Male, &["C"]),
            ("Z", Sex::Unknown, &[]),
        ];
        let mut people: People = links
            .iter()
            .map(|&(id, sex, parents)| {
                let mut p = Person::new(id, sex).with_name(id);
                p.parents = parents.iter().map(|&s| PersonId::from(s)).collect();
                p
            })
            .collect();
        Consolidator::default().refresh_ancestors(&mut people);
        people
    }

    fn rel(people: &People, a: &str, b: &str) -> Relationship {
        relationship(people, &a.into(), &b.into()).unwrap()
    }

    #[test]
    fn classifies_common_relations() {
        let people = pedigree();
        assert_eq!(rel(&people, "A", "A"), Relationship::SamePerson);
        assert_eq!(rel(&people, "A", "S"), Relationship::Siblings);
        assert_eq!(rel(&people, "P", "A"), Relationship::Ancestor { generations: 1 });
        assert_eq!(rel(&people, "K", "G"), Relationship::Descendant { generations: 3 });
        assert_eq!(rel(&people, "U", "A"), Relationship::AuntUncle { greats: 0 });
        assert_eq!(rel(&people, "K", "S"), Relationship::NieceNephew { greats: 0 });
        assert_eq!(rel(&people, "A", "C"), Relationship::Cousins { degree: 1, removed: 0 });
        assert_eq!(rel(&people, "K", "C"), Relationship::Cousins { degree: 1, removed: 1 });
        assert_eq!(rel(&people, "K", "D"), Relationship::Cousins { degree: 2, removed: 0 });
        assert_eq!(rel(&people, "A", "Z"), Relationship::Unrelated);
    }

    #[test]
    fn least_common_ancestor_reports_distances() {
        let people = pedigree();
        let (id, ga, gb) = least_common_ancestor(&people, &"K".into(), &"D".into()).unwrap();
        assert_eq!((id.as_str(), ga, gb), ("G", 3, 3));
    }

    #[test]
    fn unknown_ids_have_no_relationship() {
        let people = pedigree();
        assert_eq!(relationship(&people, &"A".into(), &"nobody".into()), None);
    }

    #[test]
    fn relate_names_the_missing_person() {
        let people = pedigree();
        let (person, relation) = relate(&people, &"U".into(), &"K".into()).unwrap();
        assert_eq!(person.id.as_str(), "U");
        assert_eq!(relation.label(person.sex), "great-uncle");

        let err = relate(&people, &"A".into(), &"nobody".into()).unwrap_err();
        assert!(matches!(err, LineageError::PersonNotFound(ref id) if id == "nobody"));
        assert_eq!(err.to_string(), "Person not found: nobody");
        let err = relate(&people, &"ghost".into(), &"A".into()).unwrap_err();
        assert!(matches!(err, LineageError::PersonNotFound(ref id) if id == "ghost"));
    }

    #[test]
    fn shadows_count_as_their_original() {
        let mut people = pedigree();
        let shadow = people.get(&"A".into()).unwrap().shadow("A_1".into());
        people.insert(shadow);
        assert_eq!(rel(&people, "A_1", "S"), Relationship::Siblings);
        assert_eq!(rel(&people, "A_1", "A"), Relationship::SamePerson);
    }

    #[test]
    fn labels_are_sex_aware() {
        let grand = Relationship::Ancestor { generations: 4 };
        assert_eq!(grand.label(Sex::Female), "great-great-grandmother");
        assert_eq!(Relationship::Siblings.label(Sex::Unknown), "sibling");
        assert_eq!(Relationship::Descendant { generations: 1 }.label(Sex::Male), "son");
        assert_eq!(Relationship::AuntUncle { greats: 1 }.label(Sex::Female), "great-aunt");
        assert_eq!(
            Relationship::Cousins { degree: 3, removed: 2 }.label(Sex::Male),
            "3rd cousin twice removed"
        );
    }

    #[test]
    fn ordinals_handle_teens() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(103), "103rd");
    }
}
