use crate::{
    db::animals::Animals,
    libs::{animal::Adoption, dates::format_date, messages::Message},
    msg_error, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct AdoptArgs {
    /// Animal ID
    id: i64,
    /// New owner's name
    #[arg(short, long)]
    owner: Option<String>,
    /// New owner's phone or e-mail
    #[arg(short, long)]
    contact: Option<String>,
    /// Adoption date (YYYY-MM-DD), today by default
    #[arg(short, long)]
    date: Option<String>,
}

fn ask(prompt: Message, default: Option<String>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt.to_string());
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

pub fn cmd(args: AdoptArgs) -> Result<()> {
    let mut animals = Animals::new()?;
    let Some(animal) = animals.get_by_id(args.id)? else {
        msg_error!(Message::AnimalNotFound(args.id));
        return Ok(());
    };
    if animal.is_adopted() {
        msg_error!(Message::AnimalAlreadyAdopted(args.id));
        return Ok(());
    }

    let owner = match args.owner {
        Some(owner) => owner,
        None => ask(Message::PromptOwnerName, None)?,
    };
    let contact = match args.contact {
        Some(contact) => contact,
        None => ask(Message::PromptOwnerContact, None)?,
    };
    let date = args.date.unwrap_or_else(|| format_date(&Local::now().date_naive()));

    let adoption = Adoption::new(&owner, &contact, &date)?;
    animals.adopt(args.id, &adoption)?;

    msg_success!(Message::AnimalAdopted(animal.name, adoption.owner_name));
    Ok(())
}
