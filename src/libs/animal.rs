//! Animal records and the rules for creating and editing them.

use super::cage;
use super::catalog::Catalog;
use super::dates::{self, age_in_months, quarantine_days_left};
use super::validation::ValidationError;
use chrono::NaiveDate;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Adoption {
    pub owner_name: String,
    pub owner_contact: String,
    pub adoption_date: Option<NaiveDate>,
}

impl Adoption {
    pub fn new(owner_name: &str, owner_contact: &str, adoption_date: &str) -> Result<Self, ValidationError> {
        let owner_name = owner_name.trim();
        let owner_contact = owner_contact.trim();
        if owner_name.is_empty() || owner_contact.is_empty() {
            return Err(ValidationError::OwnerRequired);
        }

        Ok(Self {
            owner_name: owner_name.to_string(),
            owner_contact: owner_contact.to_string(),
            adoption_date: Some(dates::parse_date("adoption date", adoption_date)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub id: Option<i64>,
    pub name: String,
    pub species: String,
    pub birth_date: Option<NaiveDate>,
    pub age_estimated: bool,
    pub arrival_date: Option<NaiveDate>,
    pub cage_number: Option<String>,
    pub quarantine_until: Option<NaiveDate>,
    pub deleted: bool,
    pub adoption: Option<Adoption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarantineStatus {
    NotApplicable,
    Active(i64),
    Expired,
}

impl Animal {
    pub fn is_adopted(&self) -> bool {
        self.adoption.is_some()
    }

    pub fn in_shelter(&self) -> bool {
        !self.deleted && !self.is_adopted()
    }

    pub fn age_months(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date.map(|birth| age_in_months(birth, today))
    }

    /// Age in months, prefixed with `~` when the birth date is an estimate.
    pub fn age_display(&self, today: NaiveDate) -> String {
        match self.age_months(today) {
            Some(months) if self.age_estimated => format!("~{}", months),
            Some(months) => months.to_string(),
            None => String::new(),
        }
    }

    pub fn birth_date_display(&self) -> String {
        match self.birth_date {
            Some(date) if self.age_estimated => format!("~{}", dates::format_date(&date)),
            Some(date) => dates::format_date(&date),
            None => String::new(),
        }
    }

    pub fn arrival_display(&self) -> String {
        self.arrival_date.map(|d| dates::format_date(&d)).unwrap_or_default()
    }

    pub fn cage_display(&self) -> String {
        self.cage_number.clone().unwrap_or_default()
    }

    pub fn quarantine_status(&self, today: NaiveDate) -> QuarantineStatus {
        let in_quarantine_cage = self.cage_number.as_deref().is_some_and(cage::is_quarantine_cage);
        match self.quarantine_until {
            Some(until) if in_quarantine_cage && self.in_shelter() => match quarantine_days_left(until, today) {
                0 => QuarantineStatus::Expired,
                days => QuarantineStatus::Active(days),
            },
            _ => QuarantineStatus::NotApplicable,
        }
    }
}

/// Joins a species and an optional breed the way records store them.
pub fn format_species(species: &str, breed: Option<&str>) -> String {
    match breed.map(str::trim).filter(|b| !b.is_empty()) {
        Some(breed) => format!("{} / {}", species.trim(), breed),
        None => species.trim().to_string(),
    }
}

/// Upper bound for an age estimate, 50 years.
pub const MAX_AGE_ESTIMATE_MONTHS: u32 = 600;

/// Raw intake form input.
#[derive(Debug, Clone, Default)]
pub struct NewAnimal {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub age_estimate_months: Option<String>,
    pub arrival_date: Option<String>,
    pub cage_number: Option<String>,
    pub quarantine_until: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl NewAnimal {
    /// Validates the form against the catalog and the currently occupied
    /// cages and produces a record ready to insert.
    pub fn validate(&self, today: NaiveDate, occupied: &[String], catalog: &Catalog) -> Result<Animal, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }

        let species = self.species.trim();
        if species.is_empty() {
            return Err(ValidationError::SpeciesRequired);
        }
        catalog.check_species(species, self.breed.as_deref())?;

        let cage_number = match non_empty(&self.cage_number) {
            Some(raw) => {
                let cage = cage::normalize(raw)?;
                if cage::is_occupied(&cage, occupied) {
                    return Err(ValidationError::CageOccupied(cage));
                }
                Some(cage)
            }
            None => None,
        };

        let (birth_date, age_estimated) = match (non_empty(&self.birth_date), non_empty(&self.age_estimate_months)) {
            (Some(birth), _) => (dates::parse_date("birth date", birth)?, false),
            (None, Some(months)) => {
                let months: u32 = months
                    .parse()
                    .ok()
                    .filter(|m| *m <= MAX_AGE_ESTIMATE_MONTHS)
                    .ok_or_else(|| ValidationError::InvalidAgeEstimate(months.to_string()))?;
                (dates::estimated_birth_date(months, today), true)
            }
            (None, None) => return Err(ValidationError::BirthDateOrEstimateRequired),
        };

        let arrival_date = dates::parse_optional_date("arrival date", self.arrival_date.as_deref())?.unwrap_or(today);
        let quarantine_until = dates::parse_optional_date("quarantine end date", self.quarantine_until.as_deref())?;

        Ok(Animal {
            id: None,
            name: name.to_string(),
            species: format_species(species, self.breed.as_deref()),
            birth_date: Some(birth_date),
            age_estimated,
            arrival_date: Some(arrival_date),
            cage_number,
            quarantine_until,
            deleted: false,
            adoption: None,
        })
    }
}

/// Columns of an animal record that can be edited one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnimalField {
    Name,
    Species,
    BirthDate,
    ArrivalDate,
    Cage,
    QuarantineUntil,
    OwnerName,
    OwnerContact,
    AdoptionDate,
}

impl AnimalField {
    pub fn column(&self) -> &'static str {
        match self {
            AnimalField::Name => "name",
            AnimalField::Species => "species",
            AnimalField::BirthDate => "birth_date",
            AnimalField::ArrivalDate => "arrival_date",
            AnimalField::Cage => "cage_number",
            AnimalField::QuarantineUntil => "quarantine_until",
            AnimalField::OwnerName => "owner_name",
            AnimalField::OwnerContact => "owner_contact",
            AnimalField::AdoptionDate => "adoption_date",
        }
    }

    /// Fields that only make sense for an animal that has been adopted.
    pub fn is_adoption_field(&self) -> bool {
        matches!(self, AnimalField::OwnerName | AnimalField::OwnerContact | AnimalField::AdoptionDate)
    }

    /// Fields that only make sense while the animal is in the shelter.
    pub fn is_shelter_field(&self) -> bool {
        matches!(self, AnimalField::Cage | AnimalField::QuarantineUntil)
    }

    /// Checks and normalises a new value for this field. `None` clears the
    /// column where that is allowed.
    pub fn validate(&self, value: &str) -> Result<Option<String>, ValidationError> {
        let value = value.trim();
        match self {
            AnimalField::Name if value.is_empty() => Err(ValidationError::NameRequired),
            AnimalField::Species if value.is_empty() => Err(ValidationError::SpeciesRequired),
            AnimalField::OwnerName | AnimalField::OwnerContact if value.is_empty() => Err(ValidationError::OwnerRequired),
            AnimalField::Name | AnimalField::Species | AnimalField::OwnerName | AnimalField::OwnerContact => Ok(Some(value.to_string())),
            AnimalField::Cage | AnimalField::QuarantineUntil | AnimalField::ArrivalDate if value.is_empty() => Ok(None),
            AnimalField::Cage => cage::normalize(value).map(Some),
            AnimalField::BirthDate => dates::parse_date("birth date", value).map(|d| Some(dates::format_date(&d))),
            AnimalField::ArrivalDate => dates::parse_date("arrival date", value).map(|d| Some(dates::format_date(&d))),
            AnimalField::QuarantineUntil => dates::parse_date("quarantine end date", value).map(|d| Some(dates::format_date(&d))),
            AnimalField::AdoptionDate => dates::parse_date("adoption date", value).map(|d| Some(dates::format_date(&d))),
        }
    }
}

impl fmt::Display for AnimalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for AnimalField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        match key.as_str() {
            "name" => Ok(AnimalField::Name),
            "species" => Ok(AnimalField::Species),
            "birth_date" => Ok(AnimalField::BirthDate),
            "arrival_date" => Ok(AnimalField::ArrivalDate),
            "cage" | "cage_number" => Ok(AnimalField::Cage),
            "quarantine_until" => Ok(AnimalField::QuarantineUntil),
            "owner_name" => Ok(AnimalField::OwnerName),
            "owner_contact" => Ok(AnimalField::OwnerContact),
            "adoption_date" => Ok(AnimalField::AdoptionDate),
            _ => Err(ValidationError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalFilter {
    InShelter,
    Adopted,
    All,
}
