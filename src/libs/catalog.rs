//! Species and medical event catalogs.
//!
//! Both catalogs are plain text files kept next to the configuration:
//!
//! `species_config.txt` lists species as sections and breeds as bare lines:
//!
//! ```text
//! [Dog]
//! Mixed
//! Labrador
//!
//! [Cat]
//! Siamese
//! ```
//!
//! `event_config.txt` declares event types with their result fields. A line
//! with `=` opens a type; field specs (`name:kind`, comma separated) may
//! continue on following lines:
//!
//! ```text
//! # type = field:kind, ...
//! Vaccination = vaccine:text, batch:text,
//!               next_due:date
//! Weighing = weight:float
//! ```

use super::data_storage::DataStorage;
use super::validation::ValidationError;
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const SPECIES_FILE_NAME: &str = "species_config.txt";
pub const LEGACY_SPECIES_FILE_NAME: &str = "spesies_config.txt";
pub const EVENTS_FILE_NAME: &str = "event_config.txt";

pub const SPECIES_TEMPLATE: &str = "# Species are sections, breeds are lines inside them
[Dog]
Mixed
Labrador
Shepherd

[Cat]
Mixed
Siamese
";

pub const EVENTS_TEMPLATE: &str = "# type = field:kind, field:kind
# kinds: text, textarea, int, float, date, bool
Vaccination = vaccine:text, batch:text, next_due:date
Deworming = drug:text, dose:text
Weighing = weight:float
Examination = temperature:float, notes:textarea
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Text,
    Textarea,
    Integer,
    Float,
    Date,
    Bool,
}

impl FieldKind {
    /// Maps a kind name from the catalog file. Unknown kinds are plain text.
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_lowercase().as_str() {
            "textarea" | "multiline" => FieldKind::Textarea,
            "int" | "integer" | "number" => FieldKind::Integer,
            "float" | "double" => FieldKind::Float,
            "date" => FieldKind::Date,
            "bool" | "boolean" | "checkbox" => FieldKind::Bool,
            _ => FieldKind::Text,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Integer => "int",
            FieldKind::Float => "float",
            FieldKind::Date => "date",
            FieldKind::Bool => "bool",
        }
    }

    /// Converts raw input into the JSON value stored for this kind.
    pub fn coerce(&self, field: &str, raw: &str) -> Result<Value, ValidationError> {
        let raw = raw.trim();
        let invalid = || ValidationError::InvalidResultValue {
            field: field.to_string(),
            kind: self.name().to_string(),
            value: raw.to_string(),
        };

        match self {
            FieldKind::Text | FieldKind::Textarea => Ok(Value::String(raw.to_string())),
            FieldKind::Integer => raw.parse::<i64>().map(Value::from).map_err(|_| invalid()),
            FieldKind::Float => raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(invalid),
            FieldKind::Date => super::dates::parse_date("result date", raw)
                .map(|d| Value::String(super::dates::format_date(&d)))
                .map_err(|_| invalid()),
            FieldKind::Bool => match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" | "y" | "on" => Ok(Value::Bool(true)),
                "0" | "false" | "no" | "n" | "off" => Ok(Value::Bool(false)),
                _ => Err(invalid()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventType {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl EventType {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Species {
    pub name: String,
    pub breeds: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub species: Vec<Species>,
    pub event_types: Vec<EventType>,
}

impl Catalog {
    /// Loads both catalog files from the default data directory.
    pub fn read() -> Result<Self> {
        Self::load(DataStorage::new().base_path())
    }

    /// Loads both catalog files from `dir`. Missing files give empty lists.
    pub fn load(dir: &Path) -> Result<Self> {
        let species_path = [SPECIES_FILE_NAME, LEGACY_SPECIES_FILE_NAME]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists());

        let species = match species_path {
            Some(path) => Self::parse_species(&fs::read_to_string(path)?),
            None => Vec::new(),
        };

        let events_path = dir.join(EVENTS_FILE_NAME);
        let event_types = if events_path.exists() {
            Self::parse_event_types(&fs::read_to_string(events_path)?)
        } else {
            Vec::new()
        };

        Ok(Self { species, event_types })
    }

    /// Writes the template catalogs into `dir` unless files already exist.
    /// Returns the names of the files that were created.
    pub fn write_templates(dir: &Path) -> Result<Vec<&'static str>> {
        fs::create_dir_all(dir)?;
        let mut created = Vec::new();

        let has_species = dir.join(SPECIES_FILE_NAME).exists() || dir.join(LEGACY_SPECIES_FILE_NAME).exists();
        if !has_species {
            fs::write(dir.join(SPECIES_FILE_NAME), SPECIES_TEMPLATE)?;
            created.push(SPECIES_FILE_NAME);
        }
        if !dir.join(EVENTS_FILE_NAME).exists() {
            fs::write(dir.join(EVENTS_FILE_NAME), EVENTS_TEMPLATE)?;
            created.push(EVENTS_FILE_NAME);
        }

        Ok(created)
    }

    pub fn parse_species(text: &str) -> Vec<Species> {
        let mut species: Vec<Species> = Vec::new();
        let mut current: Option<usize> = None;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = section.trim().to_string();
                current = match species.iter().position(|s| s.name == name) {
                    Some(index) => Some(index),
                    None => {
                        species.push(Species { name, breeds: Vec::new() });
                        Some(species.len() - 1)
                    }
                };
                continue;
            }

            // Lines before the first section carry no species
            let Some(index) = current else { continue };
            let breed = line.split(['=', ':']).next().unwrap_or(line).trim();
            if !breed.is_empty() && !species[index].breeds.iter().any(|b| b == breed) {
                species[index].breeds.push(breed.to_string());
            }
        }

        species
    }

    pub fn parse_event_types(text: &str) -> Vec<EventType> {
        let mut types: Vec<EventType> = Vec::new();
        let mut current: Option<EventType> = None;

        for raw in text.lines() {
            let mut line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            if let Some((name, remainder)) = line.split_once('=') {
                if let Some(finished) = current.take() {
                    types.push(finished);
                }
                current = Some(EventType {
                    name: name.trim().to_string(),
                    fields: Vec::new(),
                });
                line = remainder.trim();
            }

            let Some(event_type) = current.as_mut() else { continue };
            for spec in line.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if let Some((name, kind)) = spec.split_once(':') {
                    event_type.fields.push(FieldSpec {
                        name: name.trim().to_string(),
                        kind: FieldKind::parse(kind),
                    });
                }
            }
        }

        if let Some(finished) = current {
            types.push(finished);
        }
        types
    }

    pub fn species_names(&self) -> Vec<String> {
        self.species.iter().map(|s| s.name.clone()).collect()
    }

    pub fn breeds_for(&self, species: &str) -> &[String] {
        self.species
            .iter()
            .find(|s| s.name == species)
            .map(|s| s.breeds.as_slice())
            .unwrap_or(&[])
    }

    pub fn event_type(&self, name: &str) -> Option<&EventType> {
        self.event_types.iter().find(|t| t.name == name)
    }

    pub fn event_type_names(&self) -> Vec<String> {
        self.event_types.iter().map(|t| t.name.clone()).collect()
    }

    /// Checks a species/breed pair against the catalog.
    ///
    /// An empty catalog accepts anything, as does a species without breeds.
    pub fn check_species(&self, species: &str, breed: Option<&str>) -> Result<(), ValidationError> {
        if self.species.is_empty() {
            return Ok(());
        }
        let Some(entry) = self.species.iter().find(|s| s.name == species) else {
            return Err(ValidationError::UnknownSpecies(species.to_string()));
        };
        match breed.map(str::trim).filter(|b| !b.is_empty()) {
            Some(breed) if !entry.breeds.is_empty() && !entry.breeds.iter().any(|b| b == breed) => Err(ValidationError::UnknownBreed {
                species: species.to_string(),
                breed: breed.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
