//! Durable storage for the selected locale.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to access preference file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preference file '{path}': {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),
}

/// String key/value storage surviving the session.
pub trait PreferenceStore {
    /// `Ok(None)` when nothing was stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Volatile store, mostly for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a JSON object in a single file.
///
/// Writes rewrite the whole file and preserve the other keys. A missing
/// file reads as empty; a corrupt one is an error on read and is
/// overwritten on the next write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PersistenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|source| PersistenceError::Io { path: self.path.clone(), source })?;
        serde_json::from_str(&content)
            .map_err(|source| PersistenceError::Format { path: self.path.clone(), source })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut values = self.read_all().unwrap_or_else(|err| {
            tracing::warn!("Discarding unreadable preferences: {err}");
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|source| PersistenceError::Io { path: parent.to_path_buf(), source })?;
        }

        let content = serde_json::to_string_pretty(&values)
            .map_err(|source| PersistenceError::Format { path: self.path.clone(), source })?;
        std::fs::write(&self.path, content)
            .map_err(|source| PersistenceError::Io { path: self.path.clone(), source })?;

        tracing::debug!("Saved preference '{key}' to {:?}", self.path);
        Ok(())
    }
}
