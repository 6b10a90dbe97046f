//! Generic tagged record tree

use serde::{Deserialize, Serialize};

/// Tags the engine reads. Anything else in a record is carried but ignored.
pub mod tags {
    pub const INDIVIDUAL: &str = "INDI";
    pub const FAMILY: &str = "FAM";
    pub const OBJECT: &str = "OBJE";
    pub const NOTE: &str = "NOTE";

    pub const NAME: &str = "NAME";
    pub const SEX: &str = "SEX";
    pub const BIRTH: &str = "BIRT";
    pub const DEATH: &str = "DEAT";
    pub const BURIAL: &str = "BURI";
    pub const OCCUPATION: &str = "OCCU";
    pub const MARRIAGE: &str = "MARR";
    pub const DIVORCE: &str = "DIV";

    pub const DATE: &str = "DATE";
    pub const PLACE: &str = "PLAC";
    pub const TYPE: &str = "TYPE";
    pub const FILE: &str = "FILE";

    pub const FAMILY_CHILD: &str = "FAMC";
    pub const FAMILY_SPOUSE: &str = "FAMS";
    pub const HUSBAND: &str = "HUSB";
    pub const WIFE: &str = "WIFE";
    pub const CHILD: &str = "CHIL";

    pub const CONCATENATION: &str = "CONC";
    pub const CONTINUATION: &str = "CONT";
}

/// One element of the record tree: a tag, an optional cross-reference id,
/// a value and nested sub-elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Cross-reference identifier (`@I1@`), present on top-level records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    pub tag: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Record>,
}

impl Record {
    /// Create a record with a tag and value and no children
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            xref: None,
            tag: tag.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Set the cross-reference identifier
    pub fn with_xref(mut self, xref: impl Into<String>) -> Self {
        self.xref = Some(xref.into());
        self
    }

    /// Append a sub-element
    pub fn with_child(mut self, child: Record) -> Self {
        self.children.push(child);
        self
    }

    /// Identifier of this record, if it has one
    pub fn id(&self) -> Option<&str> {
        self.xref.as_deref().filter(|x| !x.is_empty())
    }

    /// Sub-elements carrying the given tag, in order
    pub fn children_tagged<'a, 't>(&'a self, tag: &'t str) -> impl Iterator<Item = &'a Record> + 't
    where
        'a: 't,
    {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Values of every sub-element carrying the given tag, in order
    pub fn child_values(&self, tag: &str) -> Vec<&str> {
        self.children_tagged(tag).map(|c| c.value.as_str()).collect()
    }

    /// Value of the first sub-element carrying the given tag
    pub fn first_child_value(&self, tag: &str) -> Option<&str> {
        self.children_tagged(tag).next().map(|c| c.value.as_str())
    }

    /// Value of the first sub-element with the tag, treating blank as absent
    pub fn non_empty_child_value(&self, tag: &str) -> Option<&str> {
        self.first_child_value(tag).filter(|v| !v.trim().is_empty())
    }

    /// The value with `CONC`/`CONT` continuation lines folded in.
    ///
    /// `CONC` appends directly, `CONT` starts a new line.
    pub fn text(&self) -> String {
        let mut text = self.value.clone();
        for child in &self.children {
            match child.tag.as_str() {
                tags::CONCATENATION => text.push_str(&child.value),
                tags::CONTINUATION => {
                    text.push('\n');
                    text.push_str(&child.value);
                }
                _ => {}
            }
        }
        text
    }
}
