//! Export of shelter records to CSV, JSON and Excel.
//!
//! Records are first collected into a [`ShelterSnapshot`], a flat,
//! serialisable copy of the database, and then written in the requested
//! format. Tables share one layout across formats: the CSV header row, the
//! Excel header row and the JSON keys use the same column names.

use crate::{
    db::{animals::Animals, events::Events},
    libs::{
        animal::{Animal, AnimalFilter},
        dates::format_date,
        event::MedicalEvent,
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportData {
    /// Animals currently in the shelter
    Animals,
    /// Adopted animals with their owners
    Adopted,
    /// Medical events of every animal
    Events,
    /// Everything above
    All,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportAnimal {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub birth_date: String,
    pub age_months: String,
    pub arrival_date: String,
    pub cage_number: String,
    pub quarantine_until: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportAdopted {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub birth_date: String,
    pub age_months: String,
    pub arrival_date: String,
    pub owner_name: String,
    pub owner_contact: String,
    pub adoption_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportEvent {
    pub id: i64,
    pub animal_id: i64,
    pub animal_name: String,
    pub event_type: String,
    pub date_start: String,
    pub date_end: String,
    pub conclusion: String,
    pub results: Map<String, Value>,
    pub documents: Vec<String>,
}

/// Everything an export can contain, read once from the database.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShelterSnapshot {
    pub animals: Vec<ExportAnimal>,
    pub adopted: Vec<ExportAdopted>,
    pub events: Vec<ExportEvent>,
}

fn date_or_empty(date: Option<NaiveDate>) -> String {
    date.as_ref().map(format_date).unwrap_or_default()
}

impl ExportAnimal {
    fn from_animal(animal: &Animal, today: NaiveDate) -> Self {
        Self {
            id: animal.id.unwrap_or(0),
            name: animal.name.clone(),
            species: animal.species.clone(),
            birth_date: animal.birth_date_display(),
            age_months: animal.age_display(today),
            arrival_date: animal.arrival_display(),
            cage_number: animal.cage_display(),
            quarantine_until: date_or_empty(animal.quarantine_until),
        }
    }
}

impl ExportAdopted {
    fn from_animal(animal: &Animal, today: NaiveDate) -> Self {
        let adoption = animal.adoption.clone();
        Self {
            id: animal.id.unwrap_or(0),
            name: animal.name.clone(),
            species: animal.species.clone(),
            birth_date: animal.birth_date_display(),
            age_months: animal.age_display(today),
            arrival_date: animal.arrival_display(),
            owner_name: adoption.as_ref().map(|a| a.owner_name.clone()).unwrap_or_default(),
            owner_contact: adoption.as_ref().map(|a| a.owner_contact.clone()).unwrap_or_default(),
            adoption_date: date_or_empty(adoption.and_then(|a| a.adoption_date)),
        }
    }
}

impl ExportEvent {
    fn from_event(event: MedicalEvent, animal_name: &str) -> Self {
        Self {
            id: event.id,
            animal_id: event.animal_id,
            animal_name: animal_name.to_string(),
            event_type: event.event_type,
            date_start: date_or_empty(event.date_start),
            date_end: date_or_empty(event.date_end),
            conclusion: event.conclusion.unwrap_or_default(),
            results: event.results,
            documents: event.documents,
        }
    }
}

/// Column headers and stringified rows of one data set.
struct Sheet {
    title: &'static str,
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl ShelterSnapshot {
    pub fn gather(animals: &mut Animals, events: &mut Events, today: NaiveDate) -> Result<Self> {
        let in_shelter = animals.fetch(AnimalFilter::InShelter)?;
        let adopted = animals.fetch(AnimalFilter::Adopted)?;

        let mut exported_events = Vec::new();
        for (animal_id, name) in animals.medical_index()? {
            for event in events.fetch_for_animal(animal_id)? {
                exported_events.push(ExportEvent::from_event(event, &name));
            }
        }

        Ok(Self {
            animals: in_shelter.iter().map(|a| ExportAnimal::from_animal(a, today)).collect(),
            adopted: adopted.iter().map(|a| ExportAdopted::from_animal(a, today)).collect(),
            events: exported_events,
        })
    }

    fn animals_sheet(&self) -> Sheet {
        Sheet {
            title: "Animals",
            headers: &["ID", "Name", "Species", "Birth date", "Age (months)", "Arrival", "Cage", "Quarantine until"],
            rows: self
                .animals
                .iter()
                .map(|a| {
                    vec![
                        a.id.to_string(),
                        a.name.clone(),
                        a.species.clone(),
                        a.birth_date.clone(),
                        a.age_months.clone(),
                        a.arrival_date.clone(),
                        a.cage_number.clone(),
                        a.quarantine_until.clone(),
                    ]
                })
                .collect(),
        }
    }

    fn adopted_sheet(&self) -> Sheet {
        Sheet {
            title: "Adopted",
            headers: &["ID", "Name", "Species", "Birth date", "Age (months)", "Arrival", "Owner", "Contact", "Adoption date"],
            rows: self
                .adopted
                .iter()
                .map(|a| {
                    vec![
                        a.id.to_string(),
                        a.name.clone(),
                        a.species.clone(),
                        a.birth_date.clone(),
                        a.age_months.clone(),
                        a.arrival_date.clone(),
                        a.owner_name.clone(),
                        a.owner_contact.clone(),
                        a.adoption_date.clone(),
                    ]
                })
                .collect(),
        }
    }

    fn events_sheet(&self) -> Sheet {
        Sheet {
            title: "Events",
            headers: &["ID", "Animal ID", "Animal", "Type", "Start", "End", "Conclusion", "Results", "Documents"],
            rows: self
                .events
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        e.animal_id.to_string(),
                        e.animal_name.clone(),
                        e.event_type.clone(),
                        e.date_start.clone(),
                        e.date_end.clone(),
                        e.conclusion.clone(),
                        if e.results.is_empty() {
                            String::new()
                        } else {
                            Value::Object(e.results.clone()).to_string()
                        },
                        e.documents.join("; "),
                    ]
                })
                .collect(),
        }
    }

    fn sheets(&self, data: ExportData) -> Vec<Sheet> {
        match data {
            ExportData::Animals => vec![self.animals_sheet()],
            ExportData::Adopted => vec![self.adopted_sheet()],
            ExportData::Events => vec![self.events_sheet()],
            ExportData::All => vec![self.animals_sheet(), self.adopted_sheet(), self.events_sheet()],
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("shelter_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, format.extension())));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, data: ExportData, snapshot: &ShelterSnapshot) -> Result<()> {
        if data == ExportData::All {
            msg_info!(Message::ExportingAllData);
        }

        match self.format {
            ExportFormat::Csv => self.export_csv(&snapshot.sheets(data))?,
            ExportFormat::Json => self.export_json(data, snapshot)?,
            ExportFormat::Excel => self.export_excel(&snapshot.sheets(data))?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_json(&self, data: ExportData, snapshot: &ShelterSnapshot) -> Result<()> {
        let value = match data {
            ExportData::Animals => serde_json::to_value(&snapshot.animals)?,
            ExportData::Adopted => serde_json::to_value(&snapshot.adopted)?,
            ExportData::Events => serde_json::to_value(&snapshot.events)?,
            ExportData::All => serde_json::json!({
                "export_date": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                "animals": snapshot.animals,
                "adopted": snapshot.adopted,
                "events": snapshot.events,
            }),
        };

        let json = serde_json::to_string_pretty(&value)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    /// A single data set is a plain table. Several are written as titled
    /// sections separated by a blank line.
    fn export_csv(&self, sheets: &[Sheet]) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(&self.output_path)?;
        let sectioned = sheets.len() > 1;

        for (index, sheet) in sheets.iter().enumerate() {
            if sectioned {
                if index > 0 {
                    wtr.write_record([""])?;
                }
                wtr.write_record([sheet.title.to_uppercase()])?;
            }
            wtr.write_record(sheet.headers)?;
            for row in &sheet.rows {
                wtr.write_record(row)?;
            }
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_excel(&self, sheets: &[Sheet]) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold().set_background_color(Color::Gray);

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.title)?;
            write_sheet(worksheet, sheet, &header_format)?;
        }

        workbook.save(&self.output_path)?;
        Ok(())
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, header_format: &Format) -> Result<()> {
    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, header_format)?;
    }

    for (i, row) in sheet.rows.iter().enumerate() {
        let row_index = i as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            // IDs stay numeric so the sheet sorts properly
            match value.parse::<f64>() {
                Ok(number) if col < 2 && sheet.headers[col].contains("ID") => {
                    worksheet.write_number(row_index, col as u16, number)?;
                }
                _ => {
                    worksheet.write_string(row_index, col as u16, value)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(())
}
