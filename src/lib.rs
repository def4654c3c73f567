//! # Shelter - animal shelter records
//!
//! A command-line tool for an animal shelter: intake of animals with cage
//! and quarantine tracking, adoptions, medical events with typed results and
//! attached documents, and export of everything to CSV, JSON or Excel.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shelter::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
