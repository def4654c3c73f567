//! Medical events recorded against an animal.

use super::catalog::Catalog;
use super::dates;
use super::validation::ValidationError;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct MedicalEvent {
    pub id: i64,
    pub animal_id: i64,
    pub event_type: String,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub conclusion: Option<String>,
    pub results: Map<String, Value>,
    pub documents: Vec<String>,
}

impl MedicalEvent {
    /// A single date, or a range when the event spans several days.
    pub fn date_display(&self) -> String {
        let start = self.date_start.map(|d| dates::format_date(&d)).unwrap_or_default();
        match self.date_end {
            Some(end) if Some(end) != self.date_start => format!("{} – {}", start, dates::format_date(&end)),
            _ => start,
        }
    }

    /// Result values in catalog order, followed by any undeclared keys.
    pub fn results_in_order(&self, catalog: &Catalog) -> Vec<(String, String)> {
        let mut ordered = Vec::new();
        if let Some(event_type) = catalog.event_type(&self.event_type) {
            for spec in &event_type.fields {
                let value = self.results.get(&spec.name).map(display_value).unwrap_or_default();
                ordered.push((spec.name.clone(), value));
            }
        }
        for (key, value) in &self.results {
            if !ordered.iter().any(|(name, _)| name == key) {
                ordered.push((key.clone(), display_value(value)));
            }
        }
        ordered
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Raw input for a new medical event.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub animal_id: i64,
    pub event_type: String,
    pub date_start: String,
    pub date_end: Option<String>,
    pub conclusion: Option<String>,
    pub results: Vec<(String, String)>,
}

/// A validated event ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub animal_id: i64,
    pub event_type: String,
    pub date_start: NaiveDate,
    pub date_end: Option<NaiveDate>,
    pub conclusion: Option<String>,
    pub results: Map<String, Value>,
}

impl NewEvent {
    pub fn validate(&self, catalog: &Catalog) -> Result<EventRecord, ValidationError> {
        let event_type = self.event_type.trim();
        if event_type.is_empty() {
            return Err(ValidationError::EventTypeRequired);
        }

        if self.date_start.trim().is_empty() {
            return Err(ValidationError::EventStartRequired);
        }
        let date_start = dates::parse_date("event start date", &self.date_start)?;
        let date_end = dates::parse_optional_date("event end date", self.date_end.as_deref())?;
        check_range(date_start, date_end)?;

        let mut results = Map::new();
        for (field, raw) in &self.results {
            if raw.trim().is_empty() {
                continue;
            }
            let value = coerce_result(catalog, event_type, field, raw)?;
            results.insert(field.trim().to_string(), value);
        }

        Ok(EventRecord {
            animal_id: self.animal_id,
            event_type: event_type.to_string(),
            date_start,
            date_end,
            conclusion: self.conclusion.as_deref().map(str::trim).filter(|c| !c.is_empty()).map(String::from),
            results,
        })
    }
}

pub fn check_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(ValidationError::EventEndBeforeStart {
            start: dates::format_date(&start),
            end: dates::format_date(&end),
        }),
        _ => Ok(()),
    }
}

/// Converts one raw result value according to the event type's field spec.
///
/// Types missing from the catalog accept free-form text fields.
pub fn coerce_result(catalog: &Catalog, event_type: &str, field: &str, raw: &str) -> Result<Value, ValidationError> {
    let field = field.trim();
    match catalog.event_type(event_type) {
        Some(spec) => match spec.field(field) {
            Some(field_spec) => field_spec.kind.coerce(field, raw),
            None => Err(ValidationError::UnknownResultField {
                event_type: event_type.to_string(),
                field: field.to_string(),
            }),
        },
        None => Ok(Value::String(raw.trim().to_string())),
    }
}

/// Splits a `name=value` command-line entry.
pub fn parse_result_entry(entry: &str) -> Result<(String, String), ValidationError> {
    match entry.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.trim().to_string())),
        _ => Err(ValidationError::MalformedResultEntry(entry.to_string())),
    }
}

/// Columns of an event that can be edited one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Type,
    DateStart,
    DateEnd,
    Conclusion,
}

impl EventField {
    pub fn column(&self) -> &'static str {
        match self {
            EventField::Type => "type",
            EventField::DateStart => "date_start",
            EventField::DateEnd => "date_end",
            EventField::Conclusion => "conclusion",
        }
    }

    /// Checks and normalises a new value. `None` clears the column.
    pub fn validate(&self, value: &str) -> Result<Option<String>, ValidationError> {
        let value = value.trim();
        match self {
            EventField::Type if value.is_empty() => Err(ValidationError::EventTypeRequired),
            EventField::DateStart if value.is_empty() => Err(ValidationError::EventStartRequired),
            EventField::DateEnd | EventField::Conclusion if value.is_empty() => Ok(None),
            EventField::Type | EventField::Conclusion => Ok(Some(value.to_string())),
            EventField::DateStart => dates::parse_date("event start date", value).map(|d| Some(dates::format_date(&d))),
            EventField::DateEnd => dates::parse_date("event end date", value).map(|d| Some(dates::format_date(&d))),
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for EventField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "type" => Ok(EventField::Type),
            "date_start" | "start" => Ok(EventField::DateStart),
            "date_end" | "end" => Ok(EventField::DateEnd),
            "conclusion" => Ok(EventField::Conclusion),
            _ => Err(ValidationError::UnknownField(s.to_string())),
        }
    }
}
