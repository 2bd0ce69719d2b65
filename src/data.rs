use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// A single typed cell value. Absence is modeled at the table level as
/// `Option<Cell>`: `None` is a missing cell, distinct from `Text("")`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn as_display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => {
                if f.fract() == 0.0 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const DAY_FIRST_DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses a date string the way the cleaning rules expect: strict ISO
/// (`2024-03-15`) first, then day-first forms (`05/03/2024` is day 5,
/// month 3). The ISO attempt always runs before the day-first fallback;
/// that order decides which rows survive date validation.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Some(parsed);
    }
    for fmt in DAY_FIRST_DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
    }
    for fmt in FALLBACK_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(parsed.date());
        }
    }
    None
}

/// Types a raw delimited-text field. Empty fields are missing; integer and
/// float literals are promoted, anything else stays text. Date strings stay
/// text here and are only interpreted by the pipeline's date stages.
pub fn infer_cell(raw: &str) -> Option<Cell> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = raw.parse::<i64>() {
        return Some(Cell::Int(parsed));
    }
    if let Ok(parsed) = raw.parse::<f64>() {
        return Some(Cell::Float(parsed));
    }
    Some(Cell::Text(raw.to_string()))
}
