//! File-backed save slot
//!
//! Writes go to a temporary file first and are renamed over the save, so an
//! interrupted write never leaves a truncated `savegame.json` behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::PersistenceError;
use super::record::SaveRecord;

/// Directory used when none is given
pub const DEFAULT_SAVE_DIR: &str = "save_data";
/// Save file name inside the save directory
pub const SAVE_FILE_NAME: &str = "savegame.json";

#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DIR)
    }
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE_NAME)
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!("{SAVE_FILE_NAME}.tmp"))
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Write the record as pretty JSON
    pub fn save(&self, record: &SaveRecord) -> Result<(), PersistenceError> {
        let path = self.path();
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| PersistenceError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let json = record.to_json().map_err(PersistenceError::Encode)?;

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;

        log::info!("Game saved to {}", path.display());
        Ok(())
    }

    /// Read the save; a missing file is [`PersistenceError::NoSaveData`]
    pub fn load(&self) -> Result<SaveRecord, PersistenceError> {
        let path = self.path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No save file at {}", path.display());
                return Err(PersistenceError::NoSaveData);
            }
            Err(source) => return Err(PersistenceError::Io { path, source }),
        };

        match SaveRecord::from_json(&json) {
            Ok(record) => {
                log::info!("Game loaded from {}", path.display());
                Ok(record)
            }
            Err(source) => {
                log::warn!("Save file {} is corrupt: {}", path.display(), source);
                Err(PersistenceError::Corrupt { path, source })
            }
        }
    }

    /// Remove the save file if there is one
    pub fn clear(&self) -> Result<(), PersistenceError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Io { path, source }),
        }
    }
}
