use super::animal::handle_edit;
use crate::{
    db::animals::Animals,
    libs::{
        animal::{AnimalField, AnimalFilter},
        messages::Message,
        view::View,
    },
    msg_error, msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct AdoptedArgs {
    #[command(subcommand)]
    command: AdoptedCommand,
}

#[derive(Debug, Subcommand)]
enum AdoptedCommand {
    /// List adopted animals
    List,
    /// Change one field of an adopted animal
    Edit {
        /// Animal ID
        id: i64,
        /// Field to change
        #[arg(value_enum)]
        field: AnimalField,
        /// New value; asked for when omitted
        value: Option<String>,
    },
}

pub fn cmd(args: AdoptedArgs) -> Result<()> {
    match args.command {
        AdoptedCommand::List => handle_list(),
        AdoptedCommand::Edit { id, field, value } => {
            let Some(animal) = Animals::new()?.get_by_id(id)? else {
                msg_error!(Message::AnimalNotFound(id));
                return Ok(());
            };
            if !animal.is_adopted() {
                msg_error!(Message::AnimalNotAdopted(id));
                return Ok(());
            }
            handle_edit(id, field, value)
        }
    }
}

fn handle_list() -> Result<()> {
    let animals = Animals::new()?.fetch(AnimalFilter::Adopted)?;

    if animals.is_empty() {
        msg_info!(Message::NoAdoptedAnimals);
        return Ok(());
    }

    msg_print!(Message::AdoptedHeader, true);
    View::adopted(&animals, Local::now().date_naive())
}
