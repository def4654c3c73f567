//! First-run setup: configuration wizard and catalog templates.

use crate::{
    libs::{catalog::Catalog, config::Config, data_storage::DataStorage, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the configuration file instead of creating one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        if Config::delete()? {
            msg_success!(Message::ConfigDeleted);
        } else {
            msg_info!(Message::ConfigNotFound);
        }
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);

    let storage = DataStorage::new();
    for file in Catalog::write_templates(storage.base_path())? {
        msg_info!(Message::CatalogTemplateWritten(storage.base_path().join(file).display().to_string()));
    }
    Ok(())
}
