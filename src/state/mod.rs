//! Persistent backup storage, following XDG Base Directory standards.
//!
//! The device keeps the location in a battery-backed register. On the host the
//! same packed value lives in a small JSON file under XDG_STATE_HOME, keeping
//! state separate from configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::constants::{CONFIG_DIR_NAME, STATE_FILE_NAME};
use crate::geo::location::{Location, LocationStore};

/// Get the state directory, `$XDG_STATE_HOME/sunfocus` or `~/.local/state/sunfocus`.
pub fn get_state_dir() -> PathBuf {
    let state_home = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local/state")
        });

    state_home.join(CONFIG_DIR_NAME)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BackupFile {
    /// Packed location register, latitude in the low half.
    location: i32,
    /// Human-readable copy, ignored when reading.
    #[serde(default, skip_deserializing)]
    location_text: String,
}

/// Location register stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the default state path.
    pub fn open_default() -> Self {
        Self::in_dir(&get_state_dir())
    }

    /// Store inside the given directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(STATE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BackupFile> {
        if !self.path.exists() {
            return Ok(BackupFile::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BackupFile::default());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn write(&self, backup: &BackupFile) -> Result<()> {
        let dir = self
            .path
            .parent()
            .context("State file has no parent directory")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create state directory {}", dir.display()))?;

        // Write beside the target and rename, so a crash never leaves a torn file
        let mut temp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut temp, backup).context("Failed to serialize backup")?;
        temp.write_all(b"\n")?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

impl LocationStore for FileStore {
    fn load_location(&self) -> Result<i32> {
        Ok(self.read()?.location)
    }

    fn save_location(&mut self, packed: i32) -> Result<()> {
        let backup = BackupFile {
            location: packed,
            location_text: Location::unpack(packed).to_string(),
        };
        self.write(&backup)?;
        log_debug!("Location register written to {}", self.path.display());
        Ok(())
    }
}

/// Write `location` into an empty store. Returns whether anything was written.
pub fn seed_location(store: &mut impl LocationStore, location: Location) -> Result<bool> {
    if store.load_location()? != 0 || !location.is_configured() {
        return Ok(false);
    }
    store.save_location(location.pack())?;
    log_debug!("Seeded stored location with {location}");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::location::BackupRegister;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_unset() {
        let dir = tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        assert_eq!(store.load_location().unwrap(), 0);
        assert!(!store.location().unwrap().is_configured());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::in_dir(&dir.path().join("nested"));
        let location = Location::new(-3685, 17478);

        store.save_location(location.pack()).unwrap();

        let reopened = FileStore::in_dir(&dir.path().join("nested"));
        assert_eq!(reopened.location().unwrap(), location);

        let content = fs::read_to_string(reopened.path()).unwrap();
        assert!(content.contains("\"location\""));
        assert!(content.contains("-36.85°, 174.78°"));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::in_dir(dir.path());
        store.save_location(Location::new(100, 100).pack()).unwrap();
        store.save_location(Location::new(200, 300).pack()).unwrap();
        assert_eq!(store.location().unwrap(), Location::new(200, 300));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        fs::write(store.path(), "not json").unwrap();
        assert!(store.load_location().is_err());
    }

    #[test]
    fn test_seed_only_when_empty() {
        let mut register = BackupRegister::default();
        assert!(seed_location(&mut register, Location::new(4984, 2401)).unwrap());
        assert!(!seed_location(&mut register, Location::new(1, 1)).unwrap());
        assert_eq!(register.location().unwrap(), Location::new(4984, 2401));

        let mut empty = BackupRegister::default();
        assert!(!seed_location(&mut empty, Location::UNSET).unwrap());
        assert_eq!(empty.write_count(), 0);
    }
}
