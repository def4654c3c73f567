//! Medical events: vaccinations, examinations, treatments and the like.

use crate::{
    db::{animals::Animals, events::Events},
    libs::{
        catalog::Catalog,
        dates::format_date,
        event::{parse_result_entry, EventField, NewEvent},
        messages::Message,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct EventArgs {
    #[command(subcommand)]
    command: EventCommand,
}

#[derive(Debug, Subcommand)]
enum EventCommand {
    /// Record a medical event for an animal
    Add {
        /// Animal ID
        animal_id: i64,
        /// Event type
        #[arg(short = 't', long = "type")]
        event_type: Option<String>,
        /// Start date (YYYY-MM-DD), today by default
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Conclusion
        #[arg(short, long)]
        conclusion: Option<String>,
        /// Result value as name=value, may be repeated
        #[arg(short, long = "result")]
        results: Vec<String>,
    },
    /// List the events of an animal
    List {
        /// Animal ID
        animal_id: i64,
    },
    /// Change type, date_start, date_end or conclusion of an event
    Edit {
        /// Event ID
        id: i64,
        /// Field to change
        field: EventField,
        /// New value; asked for when omitted, empty clears optional fields
        value: Option<String>,
    },
    /// Set or clear one result value of an event
    Result {
        /// Event ID
        id: i64,
        /// Result field name
        field: String,
        /// New value; empty removes it
        value: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: EventArgs) -> Result<()> {
    match args.command {
        EventCommand::Add {
            animal_id,
            event_type,
            start,
            end,
            conclusion,
            results,
        } => handle_add(animal_id, event_type, start, end, conclusion, results),
        EventCommand::List { animal_id } => handle_list(animal_id),
        EventCommand::Edit { id, field, value } => handle_edit(id, field, value),
        EventCommand::Result { id, field, value } => handle_result(id, field, value),
        EventCommand::Delete { id, yes } => handle_delete(id, yes),
    }
}

fn ask(prompt: String, default: Option<String>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt).allow_empty(true);
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

fn handle_add(
    animal_id: i64,
    event_type: Option<String>,
    start: Option<String>,
    end: Option<String>,
    conclusion: Option<String>,
    results: Vec<String>,
) -> Result<()> {
    let Some(animal) = Animals::new()?.get_by_id(animal_id)? else {
        msg_error!(Message::AnimalNotFound(animal_id));
        return Ok(());
    };
    let catalog = Catalog::read()?;
    let interactive = event_type.is_none();

    let event_type = match event_type {
        Some(event_type) => event_type,
        None => {
            let names = catalog.event_type_names();
            if names.is_empty() {
                ask(Message::PromptEventType.to_string(), None)?
            } else {
                let selection = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptEventType.to_string())
                    .items(&names)
                    .default(0)
                    .interact()?;
                names[selection].clone()
            }
        }
    };

    let start = match start {
        Some(start) => start,
        None if interactive => ask(Message::PromptEventStart.to_string(), Some(format_date(&Local::now().date_naive())))?,
        None => format_date(&Local::now().date_naive()),
    };
    let end = match end {
        Some(end) => Some(end),
        None if interactive => Some(ask(Message::PromptEventEnd.to_string(), None)?),
        None => None,
    };
    let conclusion = match conclusion {
        Some(conclusion) => Some(conclusion),
        None if interactive => Some(ask(Message::PromptConclusion.to_string(), None)?),
        None => None,
    };

    let mut entries = results.iter().map(|r| parse_result_entry(r)).collect::<Result<Vec<_>, _>>()?;
    if interactive && entries.is_empty() {
        if let Some(spec) = catalog.event_type(&event_type) {
            for field in &spec.fields {
                let value = ask(Message::PromptResultValue(field.name.clone(), field.kind.name().to_string()).to_string(), None)?;
                entries.push((field.name.clone(), value));
            }
        }
    }

    let new_event = NewEvent {
        animal_id,
        event_type,
        date_start: start,
        date_end: end,
        conclusion,
        results: entries,
    };

    let record = new_event.validate(&catalog)?;
    let id = Events::new()?.insert(&record)?;
    msg_success!(Message::EventAdded(record.event_type, animal.name, id));
    Ok(())
}

fn handle_list(animal_id: i64) -> Result<()> {
    let events = Events::new()?.fetch_for_animal(animal_id)?;

    if events.is_empty() {
        msg_info!(Message::NoEventsFound);
        return Ok(());
    }

    msg_print!(Message::EventsHeader(animal_id), true);
    View::events(&events)
}

fn handle_edit(id: i64, field: EventField, value: Option<String>) -> Result<()> {
    let mut events = Events::new()?;
    if events.get_by_id(id)?.is_none() {
        msg_error!(Message::EventNotFound(id));
        return Ok(());
    }

    let value = match value {
        Some(value) => value,
        None => ask(Message::PromptEventField(field.to_string()).to_string(), None)?,
    };

    events.update_field(id, field, &value)?;
    msg_success!(Message::EventUpdated(id));
    Ok(())
}

fn handle_result(id: i64, field: String, value: Option<String>) -> Result<()> {
    let mut events = Events::new()?;
    if events.get_by_id(id)?.is_none() {
        msg_error!(Message::EventNotFound(id));
        return Ok(());
    }

    let value = match value {
        Some(value) => value,
        None => ask(Message::PromptEventField(field.clone()).to_string(), None)?,
    };

    events.set_result(id, &field, &value, &Catalog::read()?)?;
    msg_success!(Message::EventUpdated(id));
    Ok(())
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let mut events = Events::new()?;
    let Some(event) = events.get_by_id(id)? else {
        msg_error!(Message::EventNotFound(id));
        return Ok(());
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteEvent(event.event_type.clone(), event.date_display()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        events.delete(id)?;
        msg_success!(Message::EventDeleted(id));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}
