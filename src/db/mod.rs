//! Database layer on a single SQLite file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shelter::db::{animals::Animals, events::Events};
//! use shelter::libs::animal::AnimalFilter;
//!
//! let mut animals = Animals::new()?;
//! for animal in animals.fetch(AnimalFilter::InShelter)? {
//!     let events = Events::new()?.fetch_for_animal(animal.id.unwrap_or(0))?;
//!     println!("{}: {} events", animal.name, events.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup; every connection is migrated before use.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Animals, their cages and adoptions.
pub mod animals;

/// Medical events and their attached documents.
pub mod events;
