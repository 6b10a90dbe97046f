//! Comparable values for human-entered dates
//!
//! Record dates are free text: `5 MAY 1827`, `ABT 1850`, `1901-1905`,
//! `May 5th, 1827`. They are stored verbatim on events and only reduced to
//! a [`SimpleDate`] when something needs to compare or display parts of
//! them.

use crate::graph::{EventKind, LifeEvent};
use chrono::NaiveDate;

const QUALIFIERS: [&str; 4] = ["ABOUT ", "ABT ", "EST ", "CAL "];

const MONTHS: [&str; 12] = [
    "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST", "SEPTEMBER",
    "OCTOBER", "NOVEMBER", "DECEMBER",
];

/// Normalize a date string for parsing.
///
/// Upper-cases, strips leading approximation qualifiers and reduces a
/// leading year range (`1827-1930`, `1827 1930`) to its first year.
pub fn clean_date(raw: &str) -> String {
    let mut date = raw.trim().to_uppercase();
    while let Some(rest) = QUALIFIERS.iter().find_map(|q| date.strip_prefix(*q)) {
        date = rest.trim_start().to_string();
    }

    while let Some(first) = leading_year_range(&date) {
        date = first;
    }
    date
}

/// `Some(first_year)` when the text starts with `YYYY-YYYY` or `YYYY YYYY`
fn leading_year_range(date: &str) -> Option<String> {
    let bytes = date.as_bytes();
    if bytes.len() < 9 {
        return None;
    }
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if digits(0..4) && matches!(bytes[4], b'-' | b' ') && digits(5..9) {
        Some(date[..4].to_string())
    } else {
        None
    }
}

/// Year, month and day pulled out of a free-text date. Any part may be
/// missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl SimpleDate {
    /// Parse leniently. Unrecognized tokens are ignored.
    pub fn parse(raw: &str) -> Self {
        let cleaned = clean_date(raw);
        let mut date = Self::default();

        for token in cleaned
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if token.chars().all(char::is_alphabetic) {
                if date.month.is_none() {
                    date.month = month_number(token);
                }
                continue;
            }

            let numeric = strip_ordinal(token);
            let Ok(n) = numeric.parse::<u32>() else {
                continue;
            };
            if numeric.len() >= 3 {
                if date.year.is_none() {
                    date.year = i32::try_from(n).ok();
                }
            } else if (1..=31).contains(&n) && date.day.is_none() {
                date.day = Some(n);
            }
        }

        date
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// Calendar date with missing month/day filled with 1. `None` without a
    /// year or when the parts do not form a real date.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        let year = self.year?;
        let month = self.month.unwrap_or(1);
        NaiveDate::from_ymd_opt(year, month, self.day.unwrap_or(1))
            .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
    }

    /// `"month-day"` when both are known
    pub fn month_day(&self) -> Option<String> {
        match (self.month, self.day) {
            (Some(month), Some(day)) => Some(format!("{month}-{day}")),
            _ => None,
        }
    }
}

fn month_number(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    let upper = token.to_uppercase();
    MONTHS
        .iter()
        .position(|m| m.starts_with(upper.as_str()))
        .and_then(|i| u32::try_from(i + 1).ok())
}

fn strip_ordinal(token: &str) -> &str {
    ["ST", "ND", "RD", "TH"]
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token)
}

/// Year of a date string, if one can be found
pub fn year_of(raw: &str) -> Option<i32> {
    SimpleDate::parse(raw).year
}

/// Sort key for an event.
///
/// A birth with no date sorts before everything, a death with no date after
/// everything. Any other missing or unparseable date sorts first.
pub fn event_sort_key(event: &LifeEvent) -> NaiveDate {
    if event.date.trim().is_empty() {
        return match event.kind {
            EventKind::Death => NaiveDate::MAX,
            _ => NaiveDate::MIN,
        };
    }
    SimpleDate::parse(&event.date)
        .to_naive()
        .unwrap_or(NaiveDate::MIN)
}

/// Stable chronological sort
pub fn sort_events(events: &mut [LifeEvent]) {
    events.sort_by_key(event_sort_key);
}
