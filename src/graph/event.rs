//! Dated, place-qualified life events

use super::person::PersonId;
use serde::{Deserialize, Serialize};

/// What a life event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Birth,
    Death,
    Burial,
    Occupation,
    Marriage,
    Divorce,
}

/// A life event. Dates are kept exactly as entered; see [`crate::date`]
/// for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub kind: EventKind,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub place: String,
    /// Subtype or value: the manner of death, the occupation title
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
    /// The opposite party of a marriage or divorce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<PersonId>,
}

impl LifeEvent {
    /// Create an event with only its kind set
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            date: String::new(),
            place: String::new(),
            detail: String::new(),
            spouse: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = place.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_spouse(mut self, spouse: Option<PersonId>) -> Self {
        self.spouse = spouse;
        self
    }

    /// True when date, place and detail are all blank. Such an event
    /// carries no information and is never emitted.
    pub fn is_blank(&self) -> bool {
        [&self.date, &self.place, &self.detail]
            .iter()
            .all(|field| field.trim().is_empty())
    }

    /// First comma-separated component of the place (`"Lviv, Ukraine"`
    /// gives `"Lviv"`)
    pub fn short_place(&self) -> &str {
        self.place.split(',').next().unwrap_or("").trim()
    }
}
