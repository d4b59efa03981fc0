//! Error types for save data.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when saving or loading the game.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No save file exists yet.
    #[error("No save data found")]
    NoSaveData,

    /// The save file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The save file exists but is not valid JSON for a save record.
    #[error("Corrupt save '{path}': {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory record could not be turned into JSON.
    #[error("Could not encode save: {0}")]
    Encode(#[source] serde_json::Error),

    /// The record parsed but describes an impossible world.
    #[error("Invalid save data: {0}")]
    Invalid(String),
}

impl PersistenceError {
    /// "Nothing saved", "unreadable save" and "impossible save" all mean start
    /// a fresh world
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PersistenceError::NoSaveData | PersistenceError::Corrupt { .. } | PersistenceError::Invalid(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_side_errors_are_not_recoverable_loads() {
        assert!(PersistenceError::NoSaveData.is_recoverable());
        assert!(PersistenceError::Invalid("bad".into()).is_recoverable());

        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let encode = PersistenceError::Encode(source);
        assert!(!encode.is_recoverable());
        assert!(encode.to_string().starts_with("Could not encode save"));
    }
}
