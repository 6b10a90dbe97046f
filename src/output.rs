//! Render-ready projections of the consolidated graph
//!
//! Four documents feed the viewer:
//!
//! - `structure.json`: one [`StructureEntry`] per person, sorted by surname
//! - `details.json`: [`DetailEntry`] keyed by id
//! - `birthdays.json`: `[id, "month-day"]` pairs in calendar order
//! - `burials.json`: `[id, place]` pairs sorted by place

use crate::date::{sort_events, year_of, SimpleDate};
use crate::error::LineageResult;
use crate::graph::{Ancestor, LifeEvent, People, Person, PersonId, Sex};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const STRUCTURE_FILE: &str = "structure.json";
pub const DETAILS_FILE: &str = "details.json";
pub const BIRTHDAYS_FILE: &str = "birthdays.json";
pub const BURIALS_FILE: &str = "burials.json";

/// Layout data for one person. `birth` and `death` are `[year, place]`
/// with the place cut to its first component; either may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureEntry {
    pub id: PersonId,
    pub name: String,
    pub sex: Sex,
    pub parents: Vec<PersonId>,
    pub spouses: Vec<PersonId>,
    pub children: Vec<PersonId>,
    pub birth: (String, String),
    pub death: (String, String),
}

impl StructureEntry {
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name().to_string(),
            sex: person.sex,
            parents: person.parents.clone(),
            spouses: person.spouses.clone(),
            children: person.children.clone(),
            birth: summary(person.birth.as_ref()),
            death: summary(person.death.as_ref()),
        }
    }
}

fn summary(event: Option<&LifeEvent>) -> (String, String) {
    match event {
        Some(e) => (
            year_of(&e.date).map(|y| y.to_string()).unwrap_or_default(),
            e.short_place().to_string(),
        ),
        None => (String::new(), String::new()),
    }
}

/// Everything the viewer shows for one person
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailEntry {
    pub id: PersonId,
    pub media: Vec<String>,
    pub names: Vec<String>,
    pub notes: Vec<String>,
    pub events: Vec<LifeEvent>,
    pub parents_hidden: bool,
    pub children_hidden: bool,
    pub redirects: bool,
    pub redirects_to: Option<PersonId>,
    pub ancestors: Vec<Ancestor>,
}

impl DetailEntry {
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            media: person.media.clone(),
            names: person.names.clone(),
            notes: person.notes.clone(),
            events: timeline(person),
            parents_hidden: person.parents_hidden,
            children_hidden: person.children_hidden,
            redirects: person.redirects(),
            redirects_to: person.redirects_to.clone(),
            ancestors: person.ancestors.clone(),
        }
    }
}

/// Birth, then marriages, divorces and occupations in date order, then
/// death and burials
pub fn timeline(person: &Person) -> Vec<LifeEvent> {
    let mut middle: Vec<LifeEvent> = person
        .marriages
        .iter()
        .chain(&person.divorces)
        .chain(&person.occupations)
        .cloned()
        .collect();
    sort_events(&mut middle);

    person
        .birth
        .iter()
        .cloned()
        .chain(middle)
        .chain(person.death.iter().cloned())
        .chain(person.burials.iter().cloned())
        .collect()
}

/// `[id, "month-day"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Birthday(pub PersonId, pub String);

/// `[id, place]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Burial(pub PersonId, pub String);

/// All four projections
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projections {
    pub structure: Vec<StructureEntry>,
    pub details: BTreeMap<PersonId, DetailEntry>,
    pub birthdays: Vec<Birthday>,
    pub burials: Vec<Burial>,
}

impl Projections {
    /// Project every person. Shadows appear in structure and details but
    /// not in the birthday or burial lists, which would otherwise repeat
    /// the person they stand in for.
    pub fn from_people(people: &People) -> Self {
        let mut structure: Vec<StructureEntry> =
            people.iter().map(StructureEntry::from_person).collect();
        structure.sort_by_cached_key(|entry| (surname_first(&entry.name), entry.id.clone()));

        let details = people
            .iter()
            .map(|p| (p.id.clone(), DetailEntry::from_person(p)))
            .collect();

        let mut birthdays: Vec<((u32, u32), Birthday)> = people
            .iter()
            .filter(|p| !p.redirects())
            .filter_map(|p| {
                let date = SimpleDate::parse(&p.birth.as_ref()?.date);
                let label = date.month_day()?;
                Some(((date.month?, date.day?), Birthday(p.id.clone(), label)))
            })
            .collect();
        birthdays.sort_by_key(|(key, _)| *key);

        let mut burials: Vec<Burial> = people
            .iter()
            .filter(|p| !p.redirects())
            .filter_map(|p| {
                let place = p.burials.first()?.place.trim();
                (!place.is_empty()).then(|| Burial(p.id.clone(), place.to_string()))
            })
            .collect();
        burials.sort_by(|a, b| a.1.cmp(&b.1));

        Self {
            structure,
            details,
            birthdays: birthdays.into_iter().map(|(_, b)| b).collect(),
            burials,
        }
    }

    /// Write the four documents as pretty JSON into `dir`, creating it if
    /// needed
    pub fn write_to(&self, dir: &Path) -> LineageResult<()> {
        std::fs::create_dir_all(dir)?;
        write_json(&dir.join(STRUCTURE_FILE), &self.structure)?;
        write_json(&dir.join(DETAILS_FILE), &self.details)?;
        write_json(&dir.join(BIRTHDAYS_FILE), &self.birthdays)?;
        write_json(&dir.join(BURIALS_FILE), &self.burials)?;
        Ok(())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> LineageResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), "wrote projection");
    Ok(())
}

/// Sort key putting the surname first: `Ivan /Koval/` sorts as
/// `koval/ivan `. Names without a surname marker sort as written.
fn surname_first(name: &str) -> String {
    match name.split_once('/') {
        Some((given, rest)) => format!("{rest}{given}").to_lowercase(),
        None => name.to_lowercase(),
    }
}
