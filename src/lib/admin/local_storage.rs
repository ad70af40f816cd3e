//! Persisted client-side key/value state kept in a single JSON file.
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const LOGIN_FLAG_KEY: &str = "isLoggedIn";
pub const USER_KEY: &str = "user";
pub const ADMIN_TOKEN_KEY: &str = "adminToken";
pub const USERS_SNAPSHOT_KEY: &str = "registeredUsers";
pub const COURSES_SNAPSHOT_KEY: &str = "courses";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed value in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> StorageError {
        StorageError::Json {
            path: self.path.clone(),
            source,
        }
    }

    /// A missing file reads as empty storage.
    fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let file = BufReader::new(File::open(&self.path).map_err(|e| self.io_error(e))?);
        serde_json::from_reader(file).map_err(|e| self.json_error(e))
    }

    /// Scratch file next to the storage file, renamed over it once written.
    pub(crate) fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("local_storage.json");
        self.path.with_file_name(format!(".{}.tmp.{}", name, std::process::id()))
    }

    /// The old file stays in place until the new one is fully on disk.
    fn write_all(&self, entries: &Map<String, Value>) -> Result<(), StorageError> {
        let tmp = self.temp_path();
        let result = self.write_file(&tmp, entries);
        if result.is_err() && tmp.is_file() {
            if let Err(err) = fs::remove_file(&tmp) {
                warn!("Could not remove {}: {}", tmp.display(), err);
            }
        }
        result?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn write_file(&self, tmp: &Path, entries: &Map<String, Value>) -> Result<(), StorageError> {
        let mut writer = BufWriter::new(File::create(tmp).map_err(|e| self.io_error(e))?);
        serde_json::to_writer_pretty(&mut writer, entries).map_err(|e| self.json_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;
        writer.get_ref().sync_all().map_err(|e| self.io_error(e))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        debug!("Reading {} from {}", key, self.path.display());
        match self.read_all()?.remove(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| self.json_error(e)),
            None => Ok(None),
        }
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        let value = serde_json::to_value(value).map_err(|e| self.json_error(e))?;
        entries.insert(key.to_owned(), value);
        self.write_all(&entries)?;
        debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
            info!("Removed {} from {}", key, self.path.display());
        }
        Ok(())
    }
}
