//! Durable client-local key/value storage, shaped like browser `localStorage`.
//!
//! Each persisted store owns exactly one key and writes a versioned blob:
//! `{"state": <store state>, "version": <n>}`. A blob that fails to decode or
//! carries another version is discarded and the store starts from defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const AUTH_KEY: &str = "auth-storage";
pub const FAVORITES_KEY: &str = "favorites-storage";
pub const VIEW_HISTORY_KEY: &str = "view-history-storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key \"{0}\": only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey(String),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key/value storage.
pub trait Storage: Send + Sync {
    /// Returns the stored value, or `None` when the key was never set.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing medium cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a key that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing medium cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) the storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Write-then-rename so a crash never leaves a half-written blob.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(io_error(&tmp))?;
        std::fs::rename(&tmp, &path).map_err(io_error(&path))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }
}

/// In-process storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

#[derive(Deserialize)]
struct Blob<T> {
    state: T,
    version: u32,
}

#[derive(Serialize)]
struct BlobRef<'a, T> {
    state: &'a T,
    version: u32,
}

/// Reads a store's blob. Missing, unreadable, undecodable, and
/// version-mismatched blobs all yield `None`; only the last three are logged.
pub(crate) fn load_persisted<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
    version: u32,
) -> Option<T> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted state");
            return None;
        }
    };

    match serde_json::from_str::<Blob<T>>(&raw) {
        Ok(blob) if blob.version == version => Some(blob.state),
        Ok(blob) => {
            tracing::warn!(
                key,
                found = blob.version,
                expected = version,
                "discarding persisted state with unexpected version"
            );
            None
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding undecodable persisted state");
            None
        }
    }
}

/// Writes a store's blob. Failures are logged and swallowed: persistence is
/// best-effort and never fails the in-memory update that triggered it.
pub(crate) fn save_persisted<T: Serialize>(
    storage: &dyn Storage,
    key: &str,
    version: u32,
    state: &T,
) {
    let raw = match serde_json::to_string(&BlobRef { state, version }) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to encode persisted state");
            return;
        }
    };
    if let Err(e) = storage.set_item(key, &raw) {
        tracing::warn!(key, error = %e, "failed to write persisted state");
    }
}

pub(crate) fn clear_persisted(storage: &dyn Storage, key: &str) {
    if let Err(e) = storage.remove_item(key) {
        tracing::warn!(key, error = %e, "failed to remove persisted state");
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
