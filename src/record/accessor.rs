//! Read-only lookup surface over a parsed record set

use super::types::{tags, Record};
use std::collections::HashMap;

/// Query surface the materializer consumes.
///
/// Implementations only look records up; they never mutate them. Unknown
/// identifiers yield `None`.
pub trait RecordAccessor {
    /// Every individual record, in source order
    fn individuals(&self) -> &[Record];

    /// Look up a family record by identifier
    fn family(&self, id: &str) -> Option<&Record>;

    /// Look up a media object record by identifier
    fn media(&self, id: &str) -> Option<&Record>;

    /// Look up a note record by identifier
    fn note(&self, id: &str) -> Option<&Record>;
}

/// Ordered records of one kind with an identifier index
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. A later record with an already indexed id stays in
    /// the ordered list but lookups keep resolving to the first one.
    pub fn push(&mut self, record: Record) {
        if let Some(id) = record.id() {
            self.index.entry(id.to_string()).or_insert(self.records.len());
        }
        self.records.push(record);
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// In-memory record set split into the four collections the engine reads
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub individuals: RecordCollection,
    pub families: RecordCollection,
    pub media: RecordCollection,
    pub notes: RecordCollection,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort a top-level record into its collection by tag.
    ///
    /// Returns `false` for tags the engine has no use for (headers,
    /// sources, trailers), which are dropped.
    pub fn insert(&mut self, record: Record) -> bool {
        let collection = match record.tag.as_str() {
            tags::INDIVIDUAL => &mut self.individuals,
            tags::FAMILY => &mut self.families,
            tags::OBJECT => &mut self.media,
            tags::NOTE => &mut self.notes,
            _ => return false,
        };
        collection.push(record);
        true
    }

    /// Build a set from top-level records
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.insert(record);
        }
        set
    }
}

impl RecordAccessor for RecordSet {
    fn individuals(&self) -> &[Record] {
        self.individuals.as_slice()
    }

    fn family(&self, id: &str) -> Option<&Record> {
        self.families.get(id)
    }

    fn media(&self, id: &str) -> Option<&Record> {
        self.media.get(id)
    }

    fn note(&self, id: &str) -> Option<&Record> {
        self.notes.get(id)
    }
}
