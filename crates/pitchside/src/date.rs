//! Best-effort date normalization.
//!
//! Source files mix ISO dates, day/month/year permutations, and written-out
//! forms like "3rd May 2021" without declaring which is in use. The
//! normalizer tries each family in turn and returns a canonical
//! [`NaiveDate`], or `None` when the value cannot be read as a date. It
//! never errors and never substitutes a default date: callers drop the row.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::DataTable;

// Ordinal day suffixes ("3rd", "21ST") reduce to the bare number before
// format matching.
static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2})(?:st|nd|rd|th)\b").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Datetime renderings whose date component we accept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Month-name renderings, matched after cleanup (commas out, ordinals
/// stripped, whitespace collapsed). chrono's `%B` accepts both full and
/// abbreviated month names, case-insensitively.
const TEXT_FORMATS: &[&str] = &["%d %B %Y", "%B %d %Y", "%d-%B-%Y", "%Y %B %d"];

/// Parse a free-form date string into a canonical calendar date.
///
/// Returns `None` for empty strings, null markers, and anything that does
/// not read as a date in a supported family. Pure: no side effects, no
/// panics.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if DataTable::is_null_value(trimmed) {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    if let Some(date) = parse_numeric(trimmed) {
        return Some(date);
    }

    let cleaned = cleanup(trimmed);
    for fmt in TEXT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(date);
        }
    }

    None
}

/// Normalize a written-out date for format matching.
fn cleanup(value: &str) -> String {
    let no_ordinals = ORDINAL_SUFFIX.replace_all(value, "$1");
    let no_commas = no_ordinals.replace(',', " ");
    WHITESPACE.replace_all(no_commas.trim(), " ").into_owned()
}

/// Parse purely numeric dates: three components separated by `-`, `/`,
/// or `.`.
///
/// A 4-digit leading component is a year. Otherwise the year is the last
/// component, and a component greater than 12 pins the day position;
/// values ambiguous between day and month are read day-first, matching
/// the convention of the source data.
fn parse_numeric(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split(['-', '/', '.']).collect();
    if parts.len() != 3 {
        return None;
    }

    let nums: Vec<u32> = parts
        .iter()
        .map(|p| p.trim().parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;

    let (year, month, day) = if parts[0].len() == 4 {
        (nums[0] as i32, nums[1], nums[2])
    } else {
        let year = expand_year(nums[2], parts[2].len());
        let (a, b) = (nums[0], nums[1]);
        if a > 12 {
            (year, b, a) // a can only be the day
        } else if b > 12 {
            (year, a, b) // b can only be the day
        } else {
            (year, b, a) // ambiguous: day-first
        }
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Widen two-digit years: 00-69 land in the 2000s, 70-99 in the 1900s.
fn expand_year(year: u32, digits: usize) -> i32 {
    if digits >= 3 {
        year as i32
    } else if year < 70 {
        2000 + year as i32
    } else {
        1900 + year as i32
    }
}
