//! Export of shelter records for spreadsheets, backups or other tools.

use crate::{
    db::{animals::Animals, events::Events},
    libs::{
        export::{ExportData, ExportFormat, Exporter, ShelterSnapshot},
        messages::Message,
    },
    msg_info,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Data set to export
    #[arg(value_enum, default_value = "all")]
    data: ExportData,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file, `shelter_export_<timestamp>.<ext>` by default
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    msg_info!(Message::ExportingData(format!("{:?}", args.data), format!("{:?}", args.format)));

    let snapshot = ShelterSnapshot::gather(&mut Animals::new()?, &mut Events::new()?, Local::now().date_naive())?;
    Exporter::new(args.format, args.output).export(args.data, &snapshot)
}
