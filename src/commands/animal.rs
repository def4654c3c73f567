//! Intake and management of animals living in the shelter.

use crate::{
    db::{animals::Animals, events::Events},
    libs::{
        animal::{AnimalField, AnimalFilter, NewAnimal, QuarantineStatus},
        cage,
        catalog::Catalog,
        config::Config,
        dates::format_date,
        messages::Message,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct AnimalArgs {
    #[command(subcommand)]
    command: AnimalCommand,
}

#[derive(Debug, Subcommand)]
enum AnimalCommand {
    /// Register a new animal; missing values are asked for
    Add(AddArgs),
    /// List animals in the shelter
    List {
        /// Only animals whose quarantine is over
        #[arg(long)]
        expired: bool,
    },
    /// Show the medical card of an animal
    Show {
        /// Animal ID
        id: i64,
    },
    /// Change one field of an animal
    Edit {
        /// Animal ID
        id: i64,
        /// Field to change
        #[arg(value_enum)]
        field: AnimalField,
        /// New value; asked for when omitted, empty clears optional fields
        value: Option<String>,
    },
    /// Remove an animal from every list
    Delete {
        /// Animal ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Name
    #[arg(short, long)]
    name: Option<String>,
    /// Species
    #[arg(short, long)]
    species: Option<String>,
    /// Breed
    #[arg(short, long)]
    breed: Option<String>,
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    birth_date: Option<String>,
    /// Estimated age in months, used when the birth date is unknown
    #[arg(long)]
    age: Option<String>,
    /// Arrival date (YYYY-MM-DD), today by default
    #[arg(long)]
    arrival: Option<String>,
    /// Cage number, the next free quarantine cage by default
    #[arg(short, long)]
    cage: Option<String>,
    /// Quarantine end date (YYYY-MM-DD)
    #[arg(short, long)]
    quarantine_until: Option<String>,
}

pub fn cmd(args: AnimalArgs) -> Result<()> {
    match args.command {
        AnimalCommand::Add(add) => handle_add(add),
        AnimalCommand::List { expired } => handle_list(expired),
        AnimalCommand::Show { id } => handle_show(id),
        AnimalCommand::Edit { id, field, value } => handle_edit(id, field, value),
        AnimalCommand::Delete { id, yes } => handle_delete(id, yes),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn prompt_text(prompt: Message, default: Option<String>, allow_empty: bool) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt.to_string()).allow_empty(allow_empty);
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

/// Picks from the catalog when it has entries, otherwise asks for free text.
fn prompt_choice(prompt: Message, choices: &[String], allow_none: bool) -> Result<Option<String>> {
    if choices.is_empty() {
        let value = prompt_text(prompt, None, allow_none)?;
        return Ok(Some(value).filter(|v| !v.trim().is_empty()));
    }

    let mut items: Vec<String> = choices.to_vec();
    if allow_none {
        items.insert(0, "-".to_string());
    }
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .items(&items)
        .default(0)
        .interact()?;

    if allow_none && selection == 0 {
        Ok(None)
    } else {
        Ok(Some(items[selection].clone()))
    }
}

fn handle_add(args: AddArgs) -> Result<()> {
    let catalog = Catalog::read()?;
    let config = Config::read()?;
    let mut animals = Animals::new()?;
    let today = today();
    let occupied = animals.cage_numbers()?;

    let name = match args.name {
        Some(name) => name,
        None => prompt_text(Message::PromptAnimalName, None, false)?,
    };

    let species = match args.species {
        Some(species) => species,
        None => prompt_choice(Message::PromptSpecies, &catalog.species_names(), false)?.unwrap_or_default(),
    };

    let breed = match args.breed {
        Some(breed) => Some(breed),
        None => {
            let breeds = catalog.breeds_for(&species);
            if breeds.is_empty() {
                None
            } else {
                prompt_choice(Message::PromptBreed, breeds, true)?
            }
        }
    };

    let (birth_date, age) = match (args.birth_date, args.age) {
        (None, None) => {
            let birth = prompt_text(Message::PromptBirthDate, None, true)?;
            if birth.trim().is_empty() {
                (None, Some(prompt_text(Message::PromptAgeMonths, None, false)?))
            } else {
                (Some(birth), None)
            }
        }
        given => given,
    };

    let cage_number = match args.cage {
        Some(cage) => Some(cage),
        None => {
            let suggested = match cage::next_free_quarantine_cage(&occupied) {
                Ok(cage) => Some(cage.to_string()),
                Err(e) => {
                    msg_warning!(e);
                    None
                }
            };
            Some(prompt_text(Message::PromptCage, suggested, true)?)
        }
    };

    let quarantine_until = match args.quarantine_until {
        Some(date) => Some(date),
        None if cage_number.as_deref().is_some_and(cage::is_quarantine_cage) => {
            let suggested = today + Duration::days(i64::from(config.quarantine_days()));
            Some(prompt_text(Message::PromptQuarantineUntil, Some(format_date(&suggested)), true)?)
        }
        None => None,
    };

    let form = NewAnimal {
        name,
        species,
        breed,
        birth_date,
        age_estimate_months: age,
        arrival_date: args.arrival,
        cage_number,
        quarantine_until,
    };

    let animal = form.validate(today, &occupied, &catalog)?;
    let id = animals.insert(&animal)?;
    msg_success!(Message::AnimalAdded(animal.name, id));
    Ok(())
}

fn handle_list(expired: bool) -> Result<()> {
    let today = today();
    let mut animals = Animals::new()?.fetch(AnimalFilter::InShelter)?;
    if expired {
        animals.retain(|a| a.quarantine_status(today) == QuarantineStatus::Expired);
    }

    if animals.is_empty() {
        msg_info!(Message::NoAnimalsFound);
        return Ok(());
    }

    msg_print!(Message::AnimalsHeader, true);
    View::animals(&animals, today)
}

fn handle_show(id: i64) -> Result<()> {
    let Some(animal) = Animals::new()?.get_by_id(id)? else {
        msg_error!(Message::AnimalNotFound(id));
        return Ok(());
    };

    let events = Events::new()?.fetch_for_animal(id)?;
    let catalog = Catalog::read()?;

    msg_print!(Message::MedicalCardHeader(animal.name.clone()), true);
    View::medical_card(&animal, &events, &catalog, today())?;
    if events.is_empty() {
        println!();
        msg_info!(Message::NoEventsFound);
    }
    Ok(())
}

pub(crate) fn handle_edit(id: i64, field: AnimalField, value: Option<String>) -> Result<()> {
    let mut animals = Animals::new()?;
    let Some(animal) = animals.get_by_id(id)? else {
        msg_error!(Message::AnimalNotFound(id));
        return Ok(());
    };

    let value = match value {
        Some(value) => value,
        None => prompt_text(Message::PromptNewValue(field.to_string(), animal.name.clone()), None, true)?,
    };

    animals.update_field(id, field, &value)?;
    msg_success!(Message::AnimalUpdated(animal.name));
    Ok(())
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let mut animals = Animals::new()?;
    let Some(animal) = animals.get_by_id(id)? else {
        msg_error!(Message::AnimalNotFound(id));
        return Ok(());
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteAnimal(animal.name.clone()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        animals.delete(id)?;
        msg_success!(Message::AnimalDeleted(animal.name));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}
