use super::animal::{Animal, QuarantineStatus};
use super::catalog::{Catalog, EventType, Species};
use super::event::MedicalEvent;
use anyhow::Result;
use chrono::NaiveDate;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Animals currently in the shelter. Rows in quarantine are yellow,
    /// rows whose quarantine is over are bold green.
    pub fn animals(animals: &[Animal], today: NaiveDate) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "SPECIES", "BIRTH DATE", "AGE (MONTHS)", "ARRIVAL", "CAGE", "QUARANTINE DAYS LEFT"]);
        for animal in animals {
            let id = animal.id.unwrap_or(0);
            let birth = animal.birth_date_display();
            let age = animal.age_display(today);
            let arrival = animal.arrival_display();
            let cage = animal.cage_display();
            match animal.quarantine_status(today) {
                QuarantineStatus::Active(days) => {
                    table.add_row(row![Fy => id, animal.name, animal.species, birth, age, arrival, cage, days]);
                }
                QuarantineStatus::Expired => {
                    table.add_row(row![bFg => id, animal.name, animal.species, birth, age, arrival, cage, 0]);
                }
                QuarantineStatus::NotApplicable => {
                    table.add_row(row![id, animal.name, animal.species, birth, age, arrival, cage, ""]);
                }
            }
        }
        table.printstd();

        Ok(())
    }

    pub fn adopted(animals: &[Animal], today: NaiveDate) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "SPECIES", "BIRTH DATE", "AGE (MONTHS)", "ARRIVAL", "OWNER", "CONTACT", "ADOPTION DATE"]);
        for animal in animals {
            let (owner, contact, date) = match &animal.adoption {
                Some(adoption) => (
                    adoption.owner_name.clone(),
                    adoption.owner_contact.clone(),
                    adoption.adoption_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                ),
                None => Default::default(),
            };
            table.add_row(row![
                animal.id.unwrap_or(0),
                animal.name,
                animal.species,
                animal.birth_date_display(),
                animal.age_display(today),
                animal.arrival_display(),
                owner,
                contact,
                date
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Medical card: the animal's details followed by one block per event.
    pub fn medical_card(animal: &Animal, events: &[MedicalEvent], catalog: &Catalog, today: NaiveDate) -> Result<()> {
        let mut header = Table::new();
        header.add_row(row![b -> "ID", animal.id.unwrap_or(0)]);
        header.add_row(row![b -> "NAME", animal.name]);
        header.add_row(row![b -> "SPECIES", animal.species]);
        header.add_row(row![b -> "BIRTH DATE", animal.birth_date_display()]);
        header.add_row(row![b -> "AGE (MONTHS)", animal.age_display(today)]);
        header.add_row(row![b -> "ARRIVAL", animal.arrival_display()]);
        if let Some(adoption) = &animal.adoption {
            header.add_row(row![b -> "OWNER", format!("{} ({})", adoption.owner_name, adoption.owner_contact)]);
        } else {
            header.add_row(row![b -> "CAGE", animal.cage_display()]);
        }
        header.printstd();

        for event in events {
            let mut table = Table::new();
            table.set_titles(row![b -> format!("#{} {}", event.id, event.event_type), b -> event.date_display()]);
            if let Some(conclusion) = &event.conclusion {
                table.add_row(row!["conclusion", conclusion]);
            }
            for (field, value) in event.results_in_order(catalog) {
                table.add_row(row![field, value]);
            }
            if !event.documents.is_empty() {
                table.add_row(row!["documents", event.documents.join("\n")]);
            }
            println!();
            table.printstd();
        }

        Ok(())
    }

    pub fn events(events: &[MedicalEvent]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TYPE", "DATE", "CONCLUSION", "DOCUMENTS"]);
        for event in events {
            table.add_row(row![
                event.id,
                event.event_type,
                event.date_display(),
                event.conclusion.clone().unwrap_or_default(),
                event.documents.len()
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Occupied cages with the animal in each.
    pub fn cages(animals: &[Animal]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["CAGE", "ID", "NAME", "QUARANTINE UNTIL"]);
        let mut occupied: Vec<&Animal> = animals.iter().filter(|a| a.cage_number.is_some()).collect();
        occupied.sort_by(|a, b| a.cage_number.cmp(&b.cage_number));
        for animal in occupied {
            table.add_row(row![
                animal.cage_display(),
                animal.id.unwrap_or(0),
                animal.name,
                animal.quarantine_until.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn species(species: &[Species]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["SPECIES", "BREEDS"]);
        for entry in species {
            table.add_row(row![entry.name, entry.breeds.join(", ")]);
        }
        table.printstd();

        Ok(())
    }

    pub fn event_types(event_types: &[EventType]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TYPE", "FIELDS"]);
        for event_type in event_types {
            let fields = event_type
                .fields
                .iter()
                .map(|f| format!("{}: {}", f.name, f.kind.name()))
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(row![event_type.name, fields]);
        }
        table.printstd();

        Ok(())
    }
}
