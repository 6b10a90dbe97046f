//! Person materialization: one individual record in, one [`Person`] out
//!
//! Missing optional data (events, media, notes, families) yields empty
//! sequences. Only an individual without an identifier or a sex tag is
//! malformed.

mod events;

use crate::graph::{EventKind, Person, PersonId, Sex};
use crate::record::{tags, Record, RecordAccessor};
use thiserror::Error;

/// Why an individual record could not become a person
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterializeError {
    #[error("individual record has no identifier")]
    MissingId,

    #[error("individual {0} has no sex tag")]
    MissingSex(String),
}

/// Result type for materialization
pub type MaterializeResult<T> = Result<T, MaterializeError>;

/// Builds persons from individual records, resolving families, media and
/// notes through a [`RecordAccessor`]
pub struct Materializer<'a, R: RecordAccessor + ?Sized> {
    records: &'a R,
    media_folder: &'a str,
}

impl<'a, R: RecordAccessor + ?Sized> Materializer<'a, R> {
    pub fn new(records: &'a R, media_folder: &'a str) -> Self {
        Self {
            records,
            media_folder,
        }
    }

    /// Materialize one individual record
    pub fn person(&self, record: &Record) -> MaterializeResult<Person> {
        let id = record.id().ok_or(MaterializeError::MissingId)?;
        let sex = record
            .first_child_value(tags::SEX)
            .map(Sex::parse)
            .ok_or_else(|| MaterializeError::MissingSex(id.to_string()))?;

        let mut person = Person::new(id, sex);
        person.names = record
            .child_values(tags::NAME)
            .into_iter()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();

        person.birth = events::first_event(record, tags::BIRTH, EventKind::Birth);
        person.death = events::first_event(record, tags::DEATH, EventKind::Death);
        person.burials = events::all_events(record, tags::BURIAL, EventKind::Burial);
        person.occupations = events::occupations(record);

        person.parents = self.parents(record, &person.id);
        self.add_unions(record, &mut person);

        person.media = self.media(record);
        person.notes = self.notes(record);

        Ok(person)
    }

    /// Husband and wife of the first family this person is a child in
    fn parents(&self, record: &Record, own: &PersonId) -> Vec<PersonId> {
        let Some(family) = record
            .non_empty_child_value(tags::FAMILY_CHILD)
            .and_then(|id| self.records.family(id))
        else {
            return Vec::new();
        };

        let mut parents: Vec<PersonId> = Vec::with_capacity(2);
        for tag in [tags::HUSBAND, tags::WIFE] {
            if let Some(parent) = family.non_empty_child_value(tag).map(PersonId::from) {
                if parent != *own && !parents.contains(&parent) {
                    parents.push(parent);
                }
            }
        }
        parents
    }

    /// Spouses, children, marriages and divorces from every family this
    /// person is a spouse in
    fn add_unions(&self, record: &Record, person: &mut Person) {
        for family in record
            .child_values(tags::FAMILY_SPOUSE)
            .into_iter()
            .filter_map(|id| self.records.family(id))
        {
            let spouse = opposite_party(family, &person.id);
            if let Some(spouse) = &spouse {
                person.spouses.push(spouse.clone());
            }

            for child in family.child_values(tags::CHILD) {
                let child = PersonId::from(child.trim());
                if !child.as_str().is_empty() && !person.children.contains(&child) {
                    person.children.push(child);
                }
            }

            if let Some(e) = events::union_event(family, EventKind::Marriage, spouse.clone()) {
                person.marriages.push(e);
            }
            if let Some(e) = events::union_event(family, EventKind::Divorce, spouse) {
                person.divorces.push(e);
            }
        }
    }

    fn media(&self, record: &Record) -> Vec<String> {
        record
            .children_tagged(tags::OBJECT)
            .filter_map(|object| {
                // Either a pointer to a media record or an inline object
                let source = self.records.media(object.value.trim()).unwrap_or(object);
                source.non_empty_child_value(tags::FILE)
            })
            .map(|file| media_path(self.media_folder, file))
            .collect()
    }

    fn notes(&self, record: &Record) -> Vec<String> {
        record
            .children_tagged(tags::NOTE)
            .map(|note| match self.records.note(note.value.trim()) {
                Some(shared) => shared.text(),
                None => note.text(),
            })
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// Whichever recorded spouse of the family is not `own`
fn opposite_party(family: &Record, own: &PersonId) -> Option<PersonId> {
    [tags::HUSBAND, tags::WIFE]
        .into_iter()
        .filter_map(|tag| family.non_empty_child_value(tag))
        .map(PersonId::from)
        .find(|id| id != own)
}

/// Join the bare file name of a stored media path onto the media folder.
/// Stored paths may use either separator style.
fn media_path(folder: &str, stored: &str) -> String {
    let file = stored.rsplit(|c: char| c == '\\' || c == '/').next().unwrap_or(stored);
    if folder.is_empty() || folder.ends_with('/') || folder.ends_with('\\') {
        format!("{folder}{file}")
    } else {
        format!("{folder}/{file}")
    }
}
