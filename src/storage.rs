//! File storage adapter for the progression store
//!
//! Each key is one JSON file in the data directory. The previous payload is
//! copied to `<key>.json.bak` before every write so it can be recovered.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use questlog_core::{CoreError, KeyValueStore};

use crate::error::{CliError, Result};

/// Directory-backed key/value store
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a new storage adapter rooted at `dir`. Nothing is created until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the live file for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn backup_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.bak", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", key))
    }

    /// Check if backup exists
    pub fn backup_exists(&self, key: &str) -> bool {
        self.backup_path(key).exists()
    }

    /// Replace the live value of `key` with its backup
    pub fn recover(&self, key: &str) -> Result<()> {
        check_key(key).map_err(CliError::from)?;
        let backup = self.backup_path(key);

        if !backup.exists() {
            return Err(CliError::storage("Backup file not found"));
        }

        fs::copy(&backup, self.path_for(key))
            .map_err(|e| CliError::storage_with_source("Failed to restore backup", e))?;
        debug!(key, "restored backup");
        Ok(())
    }

    /// Copy the current live file aside before it is overwritten
    fn backup(&self, key: &str) -> std::io::Result<()> {
        let live = self.path_for(key);
        if !live.exists() {
            return Ok(()); // Nothing to backup
        }
        fs::copy(&live, self.backup_path(key))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> questlog_core::Result<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::persistence_read_with_source(
                format!("failed to read {}", self.path_for(key).display()),
                e,
            )),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> questlog_core::Result<()> {
        check_key(key)?;
        let write_err = |e: std::io::Error| {
            CoreError::persistence_write_with_source(
                format!("failed to write {}", self.path_for(key).display()),
                e,
            )
        };

        // An unchanged payload would overwrite the backup with the live data
        if matches!(self.get(key), Ok(Some(live)) if live == value) {
            debug!(key, "payload unchanged, write skipped");
            return Ok(());
        }

        fs::create_dir_all(&self.dir).map_err(write_err)?;
        self.backup(key).map_err(write_err)?;

        // Write aside then rename, so a crash never leaves a half-written file
        let temp = self.temp_path(key);
        fs::write(&temp, value).map_err(write_err)?;
        fs::rename(&temp, self.path_for(key)).map_err(write_err)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> questlog_core::Result<()> {
        check_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::persistence_write_with_source(
                format!("failed to remove {}", self.path_for(key).display()),
                e,
            )),
        }
    }
}

/// Keys become file names, so only allow a safe character set
fn check_key(key: &str) -> questlog_core::Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CoreError::validation("key", format!("invalid storage key '{}'", key)))
    }
}
