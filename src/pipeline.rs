//! Build orchestration: records in, consolidated people out

use crate::config::LineageConfig;
use crate::consolidate::{Consolidator, Resolution};
use crate::error::LineageResult;
use crate::graph::{People, PersonId};
use crate::lint::{check_people, LintFinding};
use crate::materialize::Materializer;
use crate::record::{parse_gedcom, RecordAccessor};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// A problem found while building that did not stop the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An individual record that could not be materialized; skipped
    MalformedRecord { index: usize, reason: String },
    /// A second individual with an id already taken; skipped
    DuplicateId { id: PersonId },
    /// A parent cycle met while enumerating ancestors
    ParentCycle { id: PersonId },
}

impl Diagnostic {
    /// Whether the diagnostic means source data was discarded
    pub fn is_data_loss(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. } | Self::DuplicateId { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord { index, reason } => {
                write!(f, "individual record #{index} skipped: {reason}")
            }
            Self::DuplicateId { id } => write!(f, "duplicate individual {id} skipped"),
            Self::ParentCycle { id } => write!(f, "parent cycle through {id}"),
        }
    }
}

/// Everything a build produces
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub people: People,
    pub diagnostics: Vec<Diagnostic>,
    pub resolutions: Vec<Resolution>,
    pub findings: Vec<LintFinding>,
    /// Parent, spouse and child references that named nobody in the input
    pub dropped_references: usize,
}

impl BuildReport {
    /// Whether any source record was discarded
    pub fn has_data_loss(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_data_loss)
    }
}

/// Materialize every individual, consolidate and lint.
///
/// Malformed or duplicate individuals become diagnostics; the rest of the
/// batch proceeds.
pub fn build<R: RecordAccessor + ?Sized>(records: &R, config: &LineageConfig) -> BuildReport {
    let mut report = BuildReport::default();
    let materializer = Materializer::new(records, &config.media_folder);

    for (index, record) in records.individuals().iter().enumerate() {
        match materializer.person(record) {
            Ok(person) => {
                let id = person.id.clone();
                if !report.people.insert(person) {
                    warn!(%id, "duplicate individual; keeping the first");
                    report.diagnostics.push(Diagnostic::DuplicateId { id });
                }
            }
            Err(e) => {
                warn!(index, error = %e, "skipping malformed individual");
                report.diagnostics.push(Diagnostic::MalformedRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    report.dropped_references = report.people.retain_resolvable_edges();

    let consolidation = Consolidator::new(config).run(&mut report.people);
    report.resolutions = consolidation.resolutions;
    report.diagnostics.extend(
        consolidation
            .cycles
            .into_iter()
            .map(|id| Diagnostic::ParentCycle { id }),
    );

    report.findings = check_people(&report.people, &config.surname_rules);

    info!(
        people = report.people.len(),
        resolved = report.resolutions.len(),
        diagnostics = report.diagnostics.len(),
        "build complete"
    );
    report
}

/// Parse record text and build
pub fn build_from_text(text: &str, config: &LineageConfig) -> LineageResult<BuildReport> {
    let records = parse_gedcom(text)?;
    Ok(build(&records, config))
}

/// Read, parse and build a record file
pub fn build_from_file(path: &Path, config: &LineageConfig) -> LineageResult<BuildReport> {
    let text = std::fs::read_to_string(path)?;
    build_from_text(&text, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = "0 HEAD
0 @I1@ INDI
1 NAME Gregor /Koval/
1 SEX M
1 FAMS @F1@
0 @I2@ INDI
1 NAME Adam /Koval/
1 SEX M
1 FAMC @F1@
1 FAMS @F2@
0 @I3@ INDI
1 NAME Bella /Koval/
1 SEX F
1 FAMC @F1@
1 FAMS @F2@
0 @I4@ INDI
1 NAME Xenia /Koval/
1 SEX F
1 FAMC @F2@
0 @I2@ INDI
1 NAME Duplicate
1 SEX M
0 @I5@ INDI
1 NAME No Sex
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I99@
1 CHIL @I2@
1 CHIL @I3@
0 @F2@ FAM
1 HUSB @I2@
1 WIFE @I3@
1 CHIL @I4@
0 TRLR
";

    #[test]
    fn build_reports_and_continues() {
        let report = build_from_text(TREE, &LineageConfig::default()).unwrap();

        assert!(report.has_data_loss());
        assert!(report
            .diagnostics
            .contains(&Diagnostic::DuplicateId { id: "@I2@".into() }));
        assert!(report.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::MalformedRecord { index: 5, .. }
        )));

        // Siblings Adam and Bella married: one resolution, two shadows
        assert_eq!(report.resolutions.len(), 1);
        assert_eq!(report.people.len(), 6);
        let xenia = report.people.get(&"@I4@".into()).unwrap();
        assert_eq!(xenia.parents, vec![PersonId::from("@I2@"), "@I3_1@".into()]);
    }

    #[test]
    fn dangling_references_are_dropped() {
        let report = build_from_text(TREE, &LineageConfig::default()).unwrap();
        let adam = report.people.get(&"@I2@".into()).unwrap();
        assert_eq!(adam.parents, vec![PersonId::from("@I1@")]);
        assert_eq!(report.dropped_references, 3);
    }

    #[test]
    fn parse_errors_abort() {
        assert!(build_from_text("0 @I1@ INDI\n2 NAME x\n", &LineageConfig::default()).is_err());
    }

    #[test]
    fn diagnostics_display() {
        let d = Diagnostic::DuplicateId { id: "@I2@".into() };
        assert_eq!(d.to_string(), "duplicate individual @I2@ skipped");
        assert!(!Diagnostic::ParentCycle { id: "x".into() }.is_data_loss());
    }
}
