//! Object storage backends (made by FontLab https://www.fontlab.com/)
//!
//! Uploaded fonts land in an [`ObjectStore`] under their original file name.
//! Writes are whole-object puts: either the new bytes are visible or the old
//! ones still are, never a half-written file. Writing the same key twice
//! simply replaces the earlier object.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::StoreError;

/// Who may read an object back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    PublicRead,
    Private,
}

/// An object as held by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub visibility: Visibility,
}

/// Storage collaborator used by the upload pipeline.
pub trait ObjectStore: Send + Sync {
    /// Write the whole object in one go, replacing whatever was under `key`.
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        visibility: Visibility,
    ) -> Result<(), StoreError>;

    fn get(&self, key: &str) -> Result<StoredObject, StoreError>;

    /// Issue a time-limited read URL for `key`.
    fn signed_read_url(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        let _ = (key, ttl);
        Err(StoreError::Unsupported("signed read URLs"))
    }
}

impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        visibility: Visibility,
    ) -> Result<(), StoreError> {
        (**self).put(key, bytes, content_type, visibility)
    }

    fn get(&self, key: &str) -> Result<StoredObject, StoreError> {
        (**self).get(key)
    }

    fn signed_read_url(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        (**self).signed_read_url(key, ttl)
    }
}

impl<T: ObjectStore + ?Sized> ObjectStore for &T {
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        visibility: Visibility,
    ) -> Result<(), StoreError> {
        (**self).put(key, bytes, content_type, visibility)
    }

    fn get(&self, key: &str) -> Result<StoredObject, StoreError> {
        (**self).get(key)
    }

    fn signed_read_url(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        (**self).signed_read_url(key, ttl)
    }
}

/// True when `name` can be used as a key without escaping its directory.
pub fn is_plain_key(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if is_plain_key(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Process-local store, mostly for tests and throwaway servers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    puts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `put` calls so far.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryStore {
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        visibility: Visibility,
    ) -> Result<(), StoreError> {
        check_key(key)?;
        let object = StoredObject {
            bytes: bytes.to_vec(),
            content_type: content_type.to_string(),
            visibility,
        };
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), object);
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<StoredObject, StoreError> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn signed_read_url(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        if !self
            .objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
        {
            return Err(StoreError::NotFound(key.to_string()));
        }
        let expires = SystemTime::now()
            .checked_add(ttl)
            .and_then(|at| at.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(u64::MAX);
        Ok(format!("memory://{key}?expires={expires}"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ObjectMeta {
    content_type: String,
    visibility: Visibility,
}

const META_DIR: &str = ".meta";

/// Directory-backed store: one file per key plus a JSON sidecar under `.meta/`.
///
/// A put stages both files before either becomes visible, then renames the
/// sidecar into place and the data after it. If the data rename fails the
/// previous sidecar is put back, so a failed put leaves the old object as it
/// was. The one remaining window is a rollback that itself fails, which is
/// logged and leaves the new sidecar next to the old bytes.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(META_DIR)).map_err(|source| StoreError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.root.join(META_DIR).join(format!("{key}.json"))
    }

    // Write `bytes` to a synced temp file in `dir`, ready to be renamed into place.
    fn stage(dir: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        Ok(tmp)
    }

    fn restore_meta(&self, key: &str, previous: Option<&[u8]>) {
        let path = self.meta_path(key);
        let restored = match previous {
            Some(raw) => Self::stage(&self.root.join(META_DIR), raw)
                .and_then(|tmp| tmp.persist(&path).map(drop).map_err(|err| err.error)),
            None => fs::remove_file(&path),
        };
        if let Err(err) = restored {
            warn!(key, error = %err, "could not roll back object metadata");
        }
    }
}

impl ObjectStore for FsStore {
    fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        visibility: Visibility,
    ) -> Result<(), StoreError> {
        check_key(key)?;
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        let meta = serde_json::to_vec(&ObjectMeta {
            content_type: content_type.to_string(),
            visibility,
        })
        .map_err(|source| StoreError::Metadata {
            key: key.to_string(),
            source,
        })?;

        let staged_data = Self::stage(&self.root, bytes).map_err(io_err)?;
        let staged_meta = Self::stage(&self.root.join(META_DIR), &meta).map_err(io_err)?;

        let meta_path = self.meta_path(key);
        let previous_meta = fs::read(&meta_path).ok();
        staged_meta
            .persist(&meta_path)
            .map_err(|err| io_err(err.error))?;
        if let Err(err) = staged_data.persist(self.root.join(key)) {
            self.restore_meta(key, previous_meta.as_deref());
            return Err(io_err(err.error));
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<StoredObject, StoreError> {
        check_key(key)?;
        let bytes = fs::read(self.root.join(key)).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound(key.to_string())
            } else {
                StoreError::Io {
                    key: key.to_string(),
                    source,
                }
            }
        })?;

        // An object without a sidecar is treated as private.
        let meta = match fs::read(self.meta_path(key)) {
            Ok(raw) => serde_json::from_slice(&raw).map_err(|source| StoreError::Metadata {
                key: key.to_string(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => ObjectMeta {
                content_type: "application/octet-stream".to_string(),
                visibility: Visibility::Private,
            },
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };

        Ok(StoredObject {
            bytes,
            content_type: meta.content_type,
            visibility: meta.visibility,
        })
    }
}
