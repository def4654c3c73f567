//! Validation failures for shelter records.
//!
//! Every check performed on form input (new animals, adoptions, medical
//! events, single-field edits) reports one of these variants. They convert
//! into `anyhow::Error` at the command layer and can be matched on in tests.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Species is required")]
    SpeciesRequired,

    #[error("Unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("Unknown breed '{breed}' for species '{species}'")]
    UnknownBreed { species: String, breed: String },

    #[error("Cage number must look like 'К0000' or 'О0000', got '{0}'")]
    InvalidCageNumber(String),

    #[error("Cage {0} is already occupied")]
    CageOccupied(String),

    #[error("No free quarantine cages left")]
    NoFreeQuarantineCage,

    #[error("Invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("Either a birth date or an age estimate is required")]
    BirthDateOrEstimateRequired,

    #[error("Age estimate must be a whole number of months up to 600, got '{0}'")]
    InvalidAgeEstimate(String),

    #[error("Owner name and contact are required")]
    OwnerRequired,

    #[error("Event type is required")]
    EventTypeRequired,

    #[error("Event start date is required")]
    EventStartRequired,

    #[error("Event end date {end} is before start date {start}")]
    EventEndBeforeStart { start: String, end: String },

    #[error("Field '{field}' is not defined for event type '{event_type}'")]
    UnknownResultField { event_type: String, field: String },

    #[error("Invalid value '{value}' for {field} ({kind})")]
    InvalidResultValue { field: String, kind: String, value: String },

    #[error("Result entries must look like name=value, got '{0}'")]
    MalformedResultEntry(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' cannot be edited for this record")]
    FieldNotEditable(String),
}
