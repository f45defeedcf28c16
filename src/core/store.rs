//! Best-effort persistence for the last assistant configuration.
//!
//! Exactly one [`AssistantReply`] lives under a fixed slot in the user's
//! data directory, overwritten on every save. The blob is our own
//! flattened serialization (ASCII field names, each component's `details`
//! entries written as siblings of its promoted fields), so a failed parse
//! means a stale or foreign file; callers absorb the error and treat the
//! slot as empty.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::api::models::AssistantReply;
use crate::core::normalize::{flatten_reply, split_stored_reply};

const SLOT_FILE: &str = "last_configuration.json";

/// Errors that can occur while reading or writing the saved slot.
#[derive(Debug)]
pub enum StoreError {
    /// Failed to read or write the slot file.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The slot file exists but does not hold valid JSON.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "Failed to access saved configuration at {}: {}", path.display(), source)
            }
            StoreError::Parse { path, source } => {
                write!(f, "Failed to parse saved configuration at {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Parse { source, .. } => Some(source),
        }
    }
}

/// Single-slot store for the most recent assistant reply.
pub struct ConfigurationStore {
    dir: PathBuf,
}

impl ConfigurationStore {
    /// Store rooted at an explicit directory. Tests point this at a
    /// temporary directory.
    pub fn new(dir: PathBuf) -> Self {
        ConfigurationStore { dir }
    }

    /// Store rooted at the platform data directory.
    pub fn default_location() -> Self {
        let proj_dirs = ProjectDirs::from("org", "vitrina", "vitrina")
            .expect("Failed to determine data directory");
        ConfigurationStore::new(proj_dirs.data_dir().to_path_buf())
    }

    fn slot_path(&self) -> PathBuf {
        self.dir.join(SLOT_FILE)
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Writes the reply into the slot, replacing whatever was there.
    /// The write goes through a temp file so a crash never leaves a
    /// half-written blob behind.
    pub fn save(&self, reply: &AssistantReply) -> Result<(), StoreError> {
        let path = self.slot_path();
        let contents = flatten_reply(reply).to_string();

        fs::create_dir_all(&self.dir).map_err(|source| Self::io_error(&path, source))?;

        let mut temp_file =
            NamedTempFile::new_in(&self.dir).map_err(|source| Self::io_error(&path, source))?;
        temp_file
            .write_all(contents.as_bytes())
            .map_err(|source| Self::io_error(&path, source))?;
        temp_file
            .persist(&path)
            .map_err(|err| Self::io_error(&path, err.error))?;
        Ok(())
    }

    /// Reads the slot back. An absent slot is `Ok(None)`, not an error;
    /// a present but unreadable slot is an error the caller is expected
    /// to absorb.
    pub fn load(&self) -> Result<Option<AssistantReply>, StoreError> {
        let path = self.slot_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(Self::io_error(&path, source)),
        };

        let raw: Value = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Some(split_stored_reply(&raw)))
    }

    /// Empties the slot. Clearing an already-empty slot is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        let path = self.slot_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Self::io_error(&path, source)),
        }
    }
}
