//! Family-tree builder emitting GEDCOM-style record text

use lineage::{
    build_from_text, parse_gedcom, BuildReport, LineageConfig, Materializer, People, RecordAccessor,
};
use std::fmt::Write;

#[derive(Debug, Clone)]
struct Individual {
    id: String,
    name: String,
    sex: char,
    birth: Option<(String, String)>,
    famc: Option<String>,
    fams: Vec<String>,
}

#[derive(Debug, Clone)]
struct Family {
    id: String,
    husband: Option<String>,
    wife: Option<String>,
    children: Vec<String>,
    marriage_date: Option<String>,
}

/// Builds a small record file.
///
/// Ids are given bare (`"I1"`) and written in pointer form (`@I1@`).
/// Families are numbered in the order they are added.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    individuals: Vec<Individual>,
    families: Vec<Family>,
}

#[allow(dead_code)]
impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an individual; `sex` is `'M'`, `'F'` or `'U'`
    pub fn person(mut self, id: &str, name: &str, sex: char) -> Self {
        self.individuals.push(Individual {
            id: pointer(id),
            name: name.to_string(),
            sex,
            birth: None,
            famc: None,
            fams: Vec::new(),
        });
        self
    }

    /// Give the most recently added individual a birth event
    pub fn born(mut self, date: &str, place: &str) -> Self {
        if let Some(last) = self.individuals.last_mut() {
            last.birth = Some((date.to_string(), place.to_string()));
        }
        self
    }

    /// Add a family and link its members to it
    pub fn family(mut self, husband: Option<&str>, wife: Option<&str>, children: &[&str]) -> Self {
        let id = format!("@F{}@", self.families.len() + 1);
        for spouse in [husband, wife].into_iter().flatten() {
            if let Some(p) = self.find(spouse) {
                p.fams.push(id.clone());
            }
        }
        for &child in children {
            if let Some(p) = self.find(child) {
                p.famc.get_or_insert_with(|| id.clone());
            }
        }
        self.families.push(Family {
            id,
            husband: husband.map(pointer),
            wife: wife.map(pointer),
            children: children.iter().map(|&c| pointer(c)).collect(),
            marriage_date: None,
        });
        self
    }

    /// Give the most recently added family a marriage date
    pub fn married_in(mut self, date: &str) -> Self {
        if let Some(last) = self.families.last_mut() {
            last.marriage_date = Some(date.to_string());
        }
        self
    }

    fn find(&mut self, id: &str) -> Option<&mut Individual> {
        let id = pointer(id);
        self.individuals.iter_mut().find(|p| p.id == id)
    }

    /// Render as record text
    pub fn to_gedcom(&self) -> String {
        let mut out = String::from("0 HEAD\n1 CHAR UTF-8\n");
        for p in &self.individuals {
            let _ = writeln!(out, "0 {} INDI", p.id);
            let _ = writeln!(out, "1 NAME {}", p.name);
            let _ = writeln!(out, "1 SEX {}", p.sex);
            if let Some((date, place)) = &p.birth {
                let _ = writeln!(out, "1 BIRT\n2 DATE {date}\n2 PLAC {place}");
            }
            if let Some(famc) = &p.famc {
                let _ = writeln!(out, "1 FAMC {famc}");
            }
            for fams in &p.fams {
                let _ = writeln!(out, "1 FAMS {fams}");
            }
        }
        for f in &self.families {
            let _ = writeln!(out, "0 {} FAM", f.id);
            if let Some(h) = &f.husband {
                let _ = writeln!(out, "1 HUSB {h}");
            }
            if let Some(w) = &f.wife {
                let _ = writeln!(out, "1 WIFE {w}");
            }
            for c in &f.children {
                let _ = writeln!(out, "1 CHIL {c}");
            }
            if let Some(date) = &f.marriage_date {
                let _ = writeln!(out, "1 MARR\n2 DATE {date}");
            }
        }
        out.push_str("0 TRLR\n");
        out
    }

    /// Parse and build with the default config
    pub fn build(&self) -> BuildReport {
        self.build_with(&LineageConfig::default())
    }

    pub fn build_with(&self, config: &LineageConfig) -> BuildReport {
        build_from_text(&self.to_gedcom(), config).expect("builder emits valid records")
    }

    /// Materialized people with unresolved edges dropped, before any
    /// consolidation
    pub fn people(&self) -> People {
        let records = parse_gedcom(&self.to_gedcom()).expect("builder emits valid records");
        let materializer = Materializer::new(&records, "");
        let mut people: People = records
            .individuals()
            .iter()
            .filter_map(|r| materializer.person(r).ok())
            .collect();
        people.retain_resolvable_edges();
        people
    }
}

fn pointer(id: &str) -> String {
    format!("@{}@", id.trim_matches('@'))
}
