use crate::{
    db::events::Events,
    libs::{config::Config, documents::DocumentStore, messages::Message},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DocArgs {
    #[command(subcommand)]
    command: DocCommand,
}

#[derive(Debug, Subcommand)]
enum DocCommand {
    /// Copy a file into the animal's folder and attach it to an event
    Attach {
        /// Event ID
        event_id: i64,
        /// File to attach
        file: PathBuf,
    },
    /// Detach a file from an event; the file itself is kept
    Detach {
        /// Event ID
        event_id: i64,
        /// Attached file name
        filename: String,
    },
    /// List files in an animal's folder
    List {
        /// Animal ID
        animal_id: i64,
    },
    /// Open an animal's folder, or one of its files
    Open {
        /// Animal ID
        animal_id: i64,
        /// File name inside the folder
        filename: Option<String>,
    },
}

pub fn cmd(args: DocArgs) -> Result<()> {
    let store = DocumentStore::from_config(&Config::read()?);

    match args.command {
        DocCommand::Attach { event_id, file } => {
            let mut events = Events::new()?;
            let Some(event) = events.get_by_id(event_id)? else {
                msg_error!(Message::EventNotFound(event_id));
                return Ok(());
            };

            let filename = store.import(event.animal_id, &file)?;
            if events.add_doc(event_id, &filename)? {
                msg_success!(Message::DocumentAttached(filename, event_id));
            } else {
                msg_info!(Message::DocumentAlreadyAttached(filename));
            }
        }
        DocCommand::Detach { event_id, filename } => {
            if Events::new()?.remove_doc(event_id, &filename)? {
                msg_success!(Message::DocumentDetached(filename, event_id));
            } else {
                msg_error!(Message::DocumentNotAttached(filename, event_id));
            }
        }
        DocCommand::List { animal_id } => {
            let files = store.list(animal_id)?;
            if files.is_empty() {
                msg_info!(Message::NoDocumentsFound(animal_id));
                return Ok(());
            }
            msg_print!(Message::DocumentsHeader(store.root().join(animal_id.to_string()).display().to_string()), true);
            for file in files {
                println!("  {}", file);
            }
        }
        DocCommand::Open { animal_id, filename } => {
            let path = match filename {
                Some(name) => store.path_for(animal_id, &name),
                None => store.animal_dir(animal_id)?,
            };
            DocumentStore::open(&path)?;
        }
    }

    Ok(())
}
