//! Line-oriented reader for GEDCOM-style record files
//!
//! Each line has the shape `LEVEL [@XREF@] TAG [VALUE]`. Level 0 starts a
//! new top-level record; a line at level `n + 1` is a sub-element of the
//! closest preceding line at level `n`.

use super::accessor::RecordSet;
use super::types::{tags, Record};
use thiserror::Error;

/// Errors raised while reading record text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: invalid level '{found}'")]
    InvalidLevel { line: usize, found: String },

    #[error("line {line}: level {level} skips a level (deepest allowed is {max})")]
    LevelJump { line: usize, level: usize, max: usize },

    #[error("line {line}: missing tag")]
    MissingTag { line: usize },
}

/// Result type for record reading
pub type ParseResult<T> = Result<T, ParseError>;

/// A single decoded line
#[derive(Debug, PartialEq, Eq)]
struct Line<'a> {
    level: usize,
    xref: Option<&'a str>,
    tag: &'a str,
    value: &'a str,
}

fn parse_line(raw: &str, line: usize) -> ParseResult<Option<Line<'_>>> {
    let trimmed = raw.trim_end_matches(['\r', '\n']).trim_start();
    if trimmed.trim_end().is_empty() {
        return Ok(None);
    }

    let (level_str, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let level = level_str.parse::<usize>().map_err(|_| ParseError::InvalidLevel {
        line,
        found: level_str.to_string(),
    })?;
    let rest = rest.trim_start();

    // Cross-reference ids only appear directly after the level
    let (xref, rest) = match rest.split_once(' ') {
        Some((head, tail)) if is_xref(head) => (Some(head), tail.trim_start()),
        None if is_xref(rest) => (Some(rest), ""),
        _ => (None, rest),
    };

    let (tag, value) = rest.split_once(' ').unwrap_or((rest, ""));
    if tag.is_empty() {
        return Err(ParseError::MissingTag { line });
    }
    // Free text keeps trailing spaces so continuation lines join correctly
    let value = match tag {
        tags::NOTE | tags::CONCATENATION | tags::CONTINUATION => value,
        _ => value.trim_end(),
    };

    Ok(Some(Line { level, xref, tag, value }))
}

fn is_xref(token: &str) -> bool {
    token.len() > 2 && token.starts_with('@') && token.ends_with('@')
}

/// Close every open record deeper than `depth`
fn unwind(stack: &mut Vec<Record>, depth: usize, set: &mut RecordSet) {
    while stack.len() > depth {
        let Some(done) = stack.pop() else { break };
        match stack.last_mut() {
            Some(parent) => parent.children.push(done),
            None => {
                set.insert(done);
            }
        }
    }
}

/// Read record text into a [`RecordSet`].
///
/// Top-level records other than individuals, families, media objects and
/// notes are skipped. A leading byte-order mark and blank lines are ignored.
pub fn parse_gedcom(text: &str) -> ParseResult<RecordSet> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut set = RecordSet::new();
    let mut stack: Vec<Record> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let Some(line) = parse_line(raw, line_no)? else {
            continue;
        };

        unwind(&mut stack, line.level, &mut set);
        if line.level > stack.len() {
            return Err(ParseError::LevelJump {
                line: line_no,
                level: line.level,
                max: stack.len(),
            });
        }

        let mut record = Record::new(line.tag, line.value);
        record.xref = line.xref.map(str::to_string);
        stack.push(record);
    }

    unwind(&mut stack, 0, &mut set);
    Ok(set)
}
