//! Core library modules: domain rules, configuration, files and output.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use shelter::db::animals::Animals;
//! use shelter::libs::animal::NewAnimal;
//! use shelter::libs::catalog::Catalog;
//!
//! let form = NewAnimal {
//!     name: "Rex".to_string(),
//!     species: "Dog".to_string(),
//!     age_estimate_months: Some("6".to_string()),
//!     ..Default::default()
//! };
//! let mut animals = Animals::new()?;
//! let animal = form.validate(Local::now().date_naive(), &animals.cage_numbers()?, &Catalog::read()?)?;
//! animals.insert(&animal)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod animal;
pub mod cage;
pub mod catalog;
pub mod config;
pub mod data_storage;
pub mod dates;
pub mod documents;
pub mod event;
pub mod export;
pub mod messages;
pub mod validation;
pub mod view;
