use crate::{
    libs::{catalog::Catalog, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
enum CatalogCommand {
    /// Show species and breeds
    Species,
    /// Show event types and their result fields
    Events,
}

pub fn cmd(args: CatalogArgs) -> Result<()> {
    let catalog = Catalog::read()?;

    match args.command {
        CatalogCommand::Species => {
            if catalog.species.is_empty() {
                msg_info!(Message::CatalogEmpty);
                return Ok(());
            }
            msg_print!(Message::SpeciesHeader, true);
            View::species(&catalog.species)
        }
        CatalogCommand::Events => {
            if catalog.event_types.is_empty() {
                msg_info!(Message::CatalogEmpty);
                return Ok(());
            }
            msg_print!(Message::EventTypesHeader, true);
            View::event_types(&catalog.event_types)
        }
    }
}
