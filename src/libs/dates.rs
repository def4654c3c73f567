//! Calendar helpers for ages and quarantine countdowns.
//!
//! All dates are stored and entered as ISO `YYYY-MM-DD` strings. Ages are
//! counted in whole calendar months, ignoring the day of month.

use super::validation::ValidationError;
use chrono::{Datelike, Months, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` date. `field` names the input in the error.
pub fn parse_date(field: &'static str, text: &str) -> Result<NaiveDate, ValidationError> {
    let text = text.trim();
    let invalid = || ValidationError::InvalidDate {
        field,
        value: text.to_string(),
    };

    // chrono accepts signs and unpadded fields, the stored format does not
    let well_formed = text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())
}

/// Parses an optional date input where an empty string means "not set".
pub fn parse_optional_date(field: &'static str, text: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(field, text).map(Some),
    }
}

/// Reads a date column written by this or an older version of the program.
///
/// Older databases allowed free-text edits, so anything that is not a valid
/// date reads as `None` instead of failing the whole query.
pub fn parse_stored_date(value: Option<String>) -> Option<NaiveDate> {
    let value = value?;
    let value = value.trim().trim_start_matches('~');
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole calendar months between `birth` and `reference`.
pub fn age_in_months(birth: NaiveDate, reference: NaiveDate) -> i32 {
    (reference.year() * 12 + reference.month() as i32) - (birth.year() * 12 + birth.month() as i32)
}

/// Steps `months` back from `from`, clamping the day to the target month.
pub fn subtract_months(from: NaiveDate, months: u32) -> NaiveDate {
    from.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN)
}

pub fn estimated_birth_date(age_months: u32, today: NaiveDate) -> NaiveDate {
    subtract_months(today, age_months)
}

/// Days remaining until `until`, never negative.
pub fn quarantine_days_left(until: NaiveDate, reference: NaiveDate) -> i64 {
    (until - reference).num_days().max(0)
}
