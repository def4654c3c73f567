//! Application configuration stored as `config.json` in the data directory.
//!
//! Every module is optional; a missing file or a missing module falls back to
//! defaults, so the program works before `shelter init` has ever been run.
//!
//! ```json
//! {
//!   "quarantine": { "days": 14 },
//!   "documents": { "dir": "/srv/shelter/docs" }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_QUARANTINE_DAYS: u32 = 10;
pub const DEFAULT_DOCS_DIR_NAME: &str = "docs";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuarantineConfig {
    /// Length of the intake quarantine in days.
    pub days: u32,
}

impl Default for QuarantineConfig {
    fn default() -> Self {
        Self { days: DEFAULT_QUARANTINE_DAYS }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DocumentsConfig {
    /// Root folder for attached medical documents.
    pub dir: PathBuf,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarantine: Option<QuarantineConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<DocumentsConfig>,
}

impl Config {
    /// Reads the configuration from the default data directory.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns whether there was one.
    pub fn delete() -> Result<bool> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if path.exists() {
            fs::remove_file(path)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn quarantine_days(&self) -> u32 {
        self.quarantine.as_ref().map(|q| q.days).unwrap_or(DEFAULT_QUARANTINE_DAYS)
    }

    /// Documents root, `<data dir>/docs` unless configured.
    pub fn docs_dir(&self, storage: &DataStorage) -> PathBuf {
        match &self.documents {
            Some(documents) => documents.dir.clone(),
            None => storage.base_path().join(DEFAULT_DOCS_DIR_NAME),
        }
    }

    /// Interactive setup wizard. Current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let storage = DataStorage::new();

        let modules = vec![
            ConfigModule {
                key: "quarantine".to_string(),
                name: "Quarantine".to_string(),
            },
            ConfigModule {
                key: "documents".to_string(),
                name: "Documents".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "quarantine" => {
                    let default = config.quarantine.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleQuarantine);
                    config.quarantine = Some(QuarantineConfig {
                        days: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptQuarantineDays.to_string())
                            .default(default.days)
                            .interact_text()?,
                    });
                }
                "documents" => {
                    let default = config.docs_dir(&storage);
                    msg_print!(Message::ConfigModuleDocuments);
                    let dir: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDocumentsDir.to_string())
                        .default(default.display().to_string())
                        .interact_text()?;
                    config.documents = Some(DocumentsConfig { dir: PathBuf::from(dir) });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
