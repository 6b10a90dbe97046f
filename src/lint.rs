//! Surname/sex consistency checks
//!
//! Gendered surnames change their ending with the bearer's sex. A surname
//! whose ending contradicts the recorded sex usually means a data-entry
//! slip on one of the two.

use crate::config::SurnameRule;
use crate::graph::{People, Person, PersonId};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// One rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFinding {
    pub id: PersonId,
    pub name: String,
    pub surname: String,
    pub expected: String,
    pub found: String,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} should end in '{}', not '{}'",
            self.name, self.expected, self.found
        )
    }
}

/// Surname between the first pair of slashes: `Ivan /Koval/` gives
/// `Koval`. A missing closing slash runs to the end of the name.
pub fn surname(name: &str) -> Option<&str> {
    let (_, rest) = name.split_once('/')?;
    let surname = rest.split('/').next().unwrap_or(rest).trim();
    (!surname.is_empty()).then_some(surname)
}

/// Check one person against every rule
pub fn check_person(person: &Person, rules: &[SurnameRule]) -> Vec<LintFinding> {
    if person.redirects() {
        return Vec::new();
    }
    let Some(surname) = surname(person.name()) else {
        return Vec::new();
    };

    rules
        .iter()
        .filter(|rule| rule.sex == person.sex && !rule.forbidden_suffix.is_empty())
        .filter(|rule| surname.ends_with(rule.forbidden_suffix.as_str()))
        .map(|rule| LintFinding {
            id: person.id.clone(),
            name: person.name().to_string(),
            surname: surname.to_string(),
            expected: rule.expected.clone(),
            found: rule.forbidden_suffix.clone(),
        })
        .collect()
}

/// Check everyone, logging each finding
pub fn check_people(people: &People, rules: &[SurnameRule]) -> Vec<LintFinding> {
    let findings: Vec<LintFinding> = people
        .iter()
        .flat_map(|person| check_person(person, rules))
        .collect();
    for finding in &findings {
        warn!(id = %finding.id, "{finding}");
    }
    findings
}
