//! Core family-graph data structures

mod event;
mod people;
mod person;

#[cfg(test)]
mod tests;

pub use event::{EventKind, LifeEvent};
pub use people::People;
pub use person::{Ancestor, Person, PersonId, Sex};

pub(crate) use person::replace_id;
