//! Single-slot cache for the last uploaded font (made by FontLab https://www.fontlab.com/)
//!
//! Remembers at most one [`FontMetadata`] between sessions so a client can
//! show the last font without asking the server again. Storing a new value
//! replaces the old one. Anything unreadable in the slot is thrown away and
//! treated as empty; a stale cache is never worth an error message.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::CacheError;
use crate::upload::FontMetadata;

/// Key under which the cached font lives.
pub const SAVED_FONT_KEY: &str = "fontshelf-saved-font";

/// Minimal string key-value capability backing the cache.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn io_error(key: &str) -> impl FnOnce(io::Error) -> CacheError + '_ {
        move |source| CacheError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(key)(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(Self::io_error(key))?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(Self::io_error(key))?;
        tmp.write_all(value.as_bytes())
            .map_err(Self::io_error(key))?;
        tmp.persist(self.path(key))
            .map_err(|err| Self::io_error(key)(err.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(key)(err)),
        }
    }
}

/// The single cached font slot.
#[derive(Debug)]
pub struct FontCache<S> {
    store: S,
}

impl<S: KeyValueStore> FontCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cached font, if any. Unreadable or corrupt entries are cleared.
    pub fn load(&self) -> Option<FontMetadata> {
        let raw = match self.store.get(SAVED_FONT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "could not read cached font");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(font) => Some(font),
            Err(err) => {
                warn!(error = %err, "discarding corrupt cached font");
                if let Err(err) = self.store.remove(SAVED_FONT_KEY) {
                    warn!(error = %err, "could not clear corrupt cached font");
                }
                None
            }
        }
    }

    /// Replace the slot; `None` empties it.
    pub fn set(&self, font: Option<&FontMetadata>) -> Result<(), CacheError> {
        match font {
            Some(font) => {
                let json = serde_json::to_string(font)?;
                self.store.set(SAVED_FONT_KEY, &json)
            }
            None => self.clear(),
        }
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.remove(SAVED_FONT_KEY)
    }
}
