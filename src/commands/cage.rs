use crate::{
    db::animals::Animals,
    libs::{animal::AnimalFilter, cage, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CageArgs {
    #[command(subcommand)]
    command: CageCommand,
}

#[derive(Debug, Subcommand)]
enum CageCommand {
    /// Show the next free quarantine cage
    Next,
    /// List occupied cages
    List,
}

pub fn cmd(args: CageArgs) -> Result<()> {
    let mut animals = Animals::new()?;

    match args.command {
        CageCommand::Next => {
            let next = cage::next_free_quarantine_cage(&animals.cage_numbers()?)?;
            msg_success!(Message::NextFreeCage(next.to_string()));
        }
        CageCommand::List => {
            let in_shelter = animals.fetch(AnimalFilter::InShelter)?;
            if in_shelter.iter().all(|a| a.cage_number.is_none()) {
                msg_info!(Message::NoOccupiedCages);
                return Ok(());
            }
            msg_print!(Message::CagesHeader, true);
            View::cages(&in_shelter)?;
        }
    }

    Ok(())
}
