//! Lineage: Family-Tree Consolidation Engine
//!
//! Turns genealogical records into a person graph a tree viewer can lay
//! out without loops.
//!
//! # Core Concepts
//!
//! - **Records**: Parsed record files, reached through [`RecordAccessor`]
//! - **People**: Persons with parent, spouse and child edges
//! - **Consolidation**: Unions between partners who share an ancestor are
//!   split with shadow persons so every walk of the graph is a tree walk
//! - **Projections**: The JSON documents the viewer reads
//!
//! # Example
//!
//! ```
//! use lineage::{build_from_text, LineageConfig};
//!
//! let text = "0 @I1@ INDI\n1 NAME Ivan /Koval/\n1 SEX M\n";
//! let report = build_from_text(text, &LineageConfig::default()).unwrap();
//! assert_eq!(report.people.len(), 1);
//! ```

pub mod config;
pub mod consolidate;
pub mod date;
mod error;
mod graph;
pub mod lint;
pub mod materialize;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod relationship;

pub use config::{ConfigError, ConfigResult, LineageConfig, SurnameRule};
pub use consolidate::{
    ancestors_of, ancestors_shared, consolidate, AncestorQuery, ConsolidationReport, Consolidator,
    GraphSplitter, Resolution,
};
pub use error::{LineageError, LineageResult};
pub use graph::{Ancestor, EventKind, LifeEvent, People, Person, PersonId, Sex};
pub use lint::LintFinding;
pub use materialize::{MaterializeError, MaterializeResult, Materializer};
pub use output::Projections;
pub use pipeline::{build, build_from_file, build_from_text, BuildReport, Diagnostic};
pub use record::{parse_gedcom, ParseError, ParseResult, Record, RecordAccessor, RecordSet};
pub use relationship::{least_common_ancestor, relate, relationship, Relationship};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
