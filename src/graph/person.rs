//! Person representation in the family graph

use super::event::LifeEvent;
use serde::{Deserialize, Serialize};

/// Identifier of a person, unique within a [`People`](super::People)
/// collection (shadow nodes included).
///
/// Serializes as a plain string (`"@I12@"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Create a PersonId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a candidate id carrying a numeric disambiguator.
    ///
    /// Pointer-style ids keep their closing `@` last: `@I1@` becomes
    /// `@I1_2@` with separator `_` and counter 2.
    pub fn with_suffix(&self, separator: &str, counter: usize) -> Self {
        match self.0.strip_suffix('@') {
            Some(stem) if self.0.len() > 1 && self.0.starts_with('@') => {
                Self(format!("{stem}{separator}{counter}@"))
            }
            _ => Self(format!("{}{separator}{counter}", self.0)),
        }
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Sex classification, serialized as a lower-case single character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
    #[default]
    #[serde(rename = "u")]
    Unknown,
}

impl Sex {
    /// Classify a raw sex value. Only the first character counts and case
    /// is ignored; anything but `m`/`f` is unknown.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('m') => Self::Male,
            Some('f') => Self::Female,
            _ => Self::Unknown,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Male => 'm',
            Self::Female => 'f',
            Self::Unknown => 'u',
        }
    }
}

/// An ancestor reached by walking parent edges upward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ancestor {
    pub id: PersonId,
    /// Generation distance: 1 for a parent, 2 for a grandparent, ...
    pub generation: usize,
}

impl Ancestor {
    pub fn new(id: PersonId, generation: usize) -> Self {
        Self { id, generation }
    }
}

/// A person in the family graph.
///
/// Persons built from individual records own their vital data and the
/// relational edges derived from the source. Shadow persons created while
/// resolving consanguineous unions carry `redirects_to` and only the
/// edges needed to represent one union.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: PersonId,
    /// Raw name strings; the first one is canonical for display
    pub names: Vec<String>,
    pub sex: Sex,
    pub birth: Option<LifeEvent>,
    pub death: Option<LifeEvent>,
    pub burials: Vec<LifeEvent>,
    pub occupations: Vec<LifeEvent>,
    pub marriages: Vec<LifeEvent>,
    pub divorces: Vec<LifeEvent>,
    /// Father and/or mother, at most two
    pub parents: Vec<PersonId>,
    /// One entry per spousal union
    pub spouses: Vec<PersonId>,
    /// Children across every union
    pub children: Vec<PersonId>,
    /// Resolved media file paths
    pub media: Vec<String>,
    pub notes: Vec<String>,
    /// Filled in by the consolidation pass
    pub ancestors: Vec<Ancestor>,
    /// Target of a shadow person; `None` for persons built from records
    pub redirects_to: Option<PersonId>,
    pub parents_hidden: bool,
    pub children_hidden: bool,
}

impl Person {
    /// Create a person with an id and sex and nothing else
    pub fn new(id: impl Into<PersonId>, sex: Sex) -> Self {
        Self {
            id: id.into(),
            sex,
            ..Default::default()
        }
    }

    /// Add a name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Canonical display name, empty when no name was recorded
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }

    /// Whether this is a shadow of another person
    pub fn redirects(&self) -> bool {
        self.redirects_to.is_some()
    }

    /// Build a shadow of this person under a new id.
    ///
    /// Identity and vital snapshot are copied; every relational field starts
    /// empty and both visibility flags start cleared.
    pub fn shadow(&self, id: PersonId) -> Self {
        Self {
            id,
            names: self.names.clone(),
            sex: self.sex,
            birth: self.birth.clone(),
            death: self.death.clone(),
            burials: self.burials.clone(),
            redirects_to: Some(self.id.clone()),
            ..Default::default()
        }
    }
}

/// Replace every occurrence of `from` in `ids` with `to`, keeping positions
pub(crate) fn replace_id(ids: &mut [PersonId], from: &PersonId, to: &PersonId) {
    for id in ids.iter_mut() {
        if *id == *from {
            *id = to.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_parse_is_case_insensitive() {
        assert_eq!(Sex::parse("M"), Sex::Male);
        assert_eq!(Sex::parse("female"), Sex::Female);
        assert_eq!(Sex::parse("U"), Sex::Unknown);
        assert_eq!(Sex::parse(""), Sex::Unknown);
    }

    #[test]
    fn suffix_keeps_pointer_shape() {
        let id = PersonId::from("@I7@");
        assert_eq!(id.with_suffix("_", 1).as_str(), "@I7_1@");

        let plain = PersonId::from("I7");
        assert_eq!(plain.with_suffix("-", 3).as_str(), "I7-3");

        let lone = PersonId::from("@");
        assert_eq!(lone.with_suffix("_", 1).as_str(), "@_1");
    }

    #[test]
    fn name_defaults_to_empty() {
        let p = Person::new("@I1@", Sex::Male);
        assert_eq!(p.name(), "");
        assert_eq!(p.with_name("Ivan /Petrenko/").name(), "Ivan /Petrenko/");
    }

    #[test]
    fn shadow_copies_identity_not_relations() {
        let mut p = Person::new("@I1@", Sex::Female).with_name("Olha /Koval/");
        p.parents = vec!["@I2@".into()];
        p.spouses = vec!["@I3@".into()];
        p.children = vec!["@I4@".into()];
        p.media = vec!["photo.jpg".into()];

        let s = p.shadow("@I1_1@".into());
        assert_eq!(s.names, p.names);
        assert_eq!(s.sex, Sex::Female);
        assert!(s.redirects());
        assert_eq!(s.redirects_to, Some(p.id.clone()));
        assert!(s.parents.is_empty() && s.spouses.is_empty() && s.children.is_empty());
        assert!(s.media.is_empty());
        assert!(!s.parents_hidden && !s.children_hidden);
    }

    #[test]
    fn replace_id_keeps_position() {
        let mut ids: Vec<PersonId> = vec!["a".into(), "b".into(), "c".into()];
        replace_id(&mut ids, &"b".into(), &"x".into());
        assert_eq!(ids, vec![PersonId::from("a"), "x".into(), "c".into()]);
    }
}
