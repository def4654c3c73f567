pub mod adopt;
pub mod adopted;
pub mod animal;
pub mod cage;
pub mod catalog;
pub mod doc;
pub mod event;
pub mod export;
pub mod init;
#[cfg(debug_assertions)]
pub mod migrations;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Register, list, edit and delete animals")]
    Animal(animal::AnimalArgs),
    #[command(about = "Hand an animal over to a new owner")]
    Adopt(adopt::AdoptArgs),
    #[command(about = "Adopted animals and their owners")]
    Adopted(adopted::AdoptedArgs),
    #[command(about = "Medical events of an animal")]
    Event(event::EventArgs),
    #[command(about = "Documents attached to medical events")]
    Doc(doc::DocArgs),
    #[command(about = "Cage occupancy")]
    Cage(cage::CageArgs),
    #[command(about = "Show the species and event catalogs")]
    Catalog(catalog::CatalogArgs),
    #[command(about = "Export data to CSV, JSON or Excel")]
    Export(export::ExportArgs),
    #[cfg(debug_assertions)]
    #[command(about = "Database migrations (debug builds only)")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Animal(args) => animal::cmd(args),
            Commands::Adopt(args) => adopt::cmd(args),
            Commands::Adopted(args) => adopted::cmd(args),
            Commands::Event(args) => event::cmd(args),
            Commands::Doc(args) => doc::cmd(args),
            Commands::Cage(args) => cage::cmd(args),
            Commands::Catalog(args) => catalog::cmd(args),
            Commands::Export(args) => export::cmd(args),
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
