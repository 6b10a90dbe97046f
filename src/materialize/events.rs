//! Life-event extraction from record sub-elements

use crate::graph::{EventKind, LifeEvent, PersonId};
use crate::record::{tags, Record};

#[derive(Debug, Clone, Copy)]
enum Field {
    Date,
    Place,
    Detail,
}

/// Which sub-element tag feeds which event field. The first occurrence of
/// each tag wins.
const FIELD_TAGS: [(&str, Field); 3] = [
    (tags::DATE, Field::Date),
    (tags::PLACE, Field::Place),
    (tags::TYPE, Field::Detail),
];

/// Read one event element (`BIRT`, `MARR`, ...) into a [`LifeEvent`]
pub(crate) fn event_from(element: &Record, kind: EventKind) -> LifeEvent {
    let mut event = LifeEvent::new(kind);
    for child in &element.children {
        let Some((_, field)) = FIELD_TAGS.iter().find(|(tag, _)| *tag == child.tag) else {
            continue;
        };
        let slot = match field {
            Field::Date => &mut event.date,
            Field::Place => &mut event.place,
            Field::Detail => &mut event.detail,
        };
        if slot.is_empty() {
            *slot = child.value.trim().to_string();
        }
    }
    event
}

/// The first non-blank event of a kind on a record (birth, death)
pub(crate) fn first_event(record: &Record, tag: &str, kind: EventKind) -> Option<LifeEvent> {
    record
        .children_tagged(tag)
        .map(|element| event_from(element, kind))
        .find(|event| !event.is_blank())
}

/// Every non-blank event of a kind on a record (burials)
pub(crate) fn all_events(record: &Record, tag: &str, kind: EventKind) -> Vec<LifeEvent> {
    record
        .children_tagged(tag)
        .map(|element| event_from(element, kind))
        .filter(|event| !event.is_blank())
        .collect()
}

/// Occupations: the element value is the title, dated and placed by its
/// sub-elements
pub(crate) fn occupations(record: &Record) -> Vec<LifeEvent> {
    record
        .children_tagged(tags::OCCUPATION)
        .map(|element| {
            let mut event = event_from(element, EventKind::Occupation);
            let title = element.value.trim();
            if !title.is_empty() {
                event.detail = title.to_string();
            }
            event
        })
        .filter(|event| !event.is_blank())
        .collect()
}

/// The marriage or divorce of one family, attributed to the opposite party.
///
/// Only the family's own sub-elements are read, so dates never leak between
/// unions.
pub(crate) fn union_event(
    family: &Record,
    kind: EventKind,
    spouse: Option<PersonId>,
) -> Option<LifeEvent> {
    let tag = match kind {
        EventKind::Marriage => tags::MARRIAGE,
        EventKind::Divorce => tags::DIVORCE,
        _ => return None,
    };
    first_event(family, tag, kind).map(|event| event.with_spouse(spouse))
}
