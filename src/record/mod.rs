//! Raw genealogical records
//!
//! The engine never inspects record syntax directly. It reads typed
//! values through [`Record`] helpers and resolves cross-references through
//! the [`RecordAccessor`] trait. [`parse_gedcom`] builds an in-memory
//! [`RecordSet`] from GEDCOM-style text.

mod accessor;
mod reader;
mod types;

pub use accessor::{RecordAccessor, RecordCollection, RecordSet};
pub use reader::{parse_gedcom, ParseError, ParseResult};
pub use types::{tags, Record};
