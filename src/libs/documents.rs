//! Folder of medical documents, one sub-folder per animal.

use super::config::Config;
use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug, msg_error_anyhow};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::SystemTime;

pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the configured documents folder.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.docs_dir(&DataStorage::new()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder of one animal, created on first use.
    pub fn animal_dir(&self, animal_id: i64) -> Result<PathBuf> {
        let dir = self.root.join(animal_id.to_string());
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn path_for(&self, animal_id: i64, filename: &str) -> PathBuf {
        self.root.join(animal_id.to_string()).join(filename)
    }

    /// Copies `source` into the animal's folder and returns the stored file
    /// name. A file already inside the folder is left where it is.
    pub fn import(&self, animal_id: i64, source: &Path) -> Result<String> {
        if !source.is_file() {
            msg_bail_anyhow!(Message::DocumentSourceMissing(source.display().to_string()));
        }
        let filename = source
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .ok_or_else(|| msg_error_anyhow!(Message::DocumentSourceMissing(source.display().to_string())))?;

        let target = self.animal_dir(animal_id)?.join(&filename);
        if target.exists() {
            if fs::canonicalize(&target)? == fs::canonicalize(source)? {
                return Ok(filename);
            }
            msg_bail_anyhow!(Message::DocumentNameTaken(filename));
        }

        fs::copy(source, &target)?;
        msg_debug!(format!("Copied {} to {}", source.display(), target.display()));
        Ok(filename)
    }

    /// File names in the animal's folder, oldest first.
    pub fn list(&self, animal_id: i64) -> Result<Vec<String>> {
        let dir = self.root.join(animal_id.to_string());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files: Vec<(SystemTime, String)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                files.push((metadata.modified()?, name.to_string()));
            }
        }
        files.sort();

        Ok(files.into_iter().map(|(_, name)| name).collect())
    }

    /// Opens a file or folder with the desktop's default application.
    pub fn open(path: &Path) -> Result<()> {
        if !path.exists() {
            msg_bail_anyhow!(Message::DocumentNotFound(path.display().to_string()));
        }

        let mut command = if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        } else if cfg!(target_os = "macos") {
            Command::new("open")
        } else {
            Command::new("xdg-open")
        };
        command.arg(path).spawn()?;
        Ok(())
    }
}
