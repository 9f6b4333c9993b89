//! Key-value persistence for favorites and history
//!
//! The session only sees `PersistenceGateway`: load or save one named
//! JSON blob. A failed save never rolls back the in-memory state.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use crate::error::PersistenceError;

/// Blob holding the favorites array
pub const FAVORITES_BLOB: &str = "favorites";

/// Blob holding the history array, most recent first
pub const HISTORY_BLOB: &str = "history";

/// Durable store of named JSON blobs
pub trait PersistenceGateway: Send + Sync {
    /// Read a blob. A blob that was never written is `Ok(None)`.
    fn load_blob(&self, name: &str) -> Result<Option<JsonValue>, PersistenceError>;

    /// Replace a blob
    fn save_blob(&self, name: &str, value: &JsonValue) -> Result<(), PersistenceError>;
}

/// Result of a save attempt, reported back to the caller
#[derive(Debug)]
pub enum SaveStatus {
    Saved,
    Failed(PersistenceError),
}

impl SaveStatus {
    pub(crate) fn from_result(result: Result<(), PersistenceError>) -> Self {
        match result {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                warn!(blob = e.blob(), error = %e, "save failed, keeping in-memory state");
                SaveStatus::Failed(e)
            }
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }

    pub fn error(&self) -> Option<&PersistenceError> {
        match self {
            SaveStatus::Saved => None,
            SaveStatus::Failed(e) => Some(e),
        }
    }
}

// ============ MemoryStore ============

#[derive(Debug, Default)]
struct MemoryInner {
    blobs: HashMap<String, JsonValue>,
    fail_saves: bool,
    saves: usize,
}

/// In-memory store. Clones share the same blobs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail with `Rejected`
    pub fn set_fail_saves(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_saves = fail;
        }
    }

    /// Current content of a blob
    pub fn blob(&self, name: &str) -> Option<JsonValue> {
        self.inner.lock().ok()?.blobs.get(name).cloned()
    }

    /// Seed a blob directly, bypassing the failure switch
    pub fn insert(&self, name: &str, value: JsonValue) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.blobs.insert(name.to_string(), value);
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.saves).unwrap_or(0)
    }

    fn poisoned(name: &str) -> PersistenceError {
        PersistenceError::Rejected {
            name: name.to_string(),
            reason: "store lock poisoned".to_string(),
        }
    }
}

impl PersistenceGateway for MemoryStore {
    fn load_blob(&self, name: &str) -> Result<Option<JsonValue>, PersistenceError> {
        let inner = self.inner.lock().map_err(|_| Self::poisoned(name))?;
        Ok(inner.blobs.get(name).cloned())
    }

    fn save_blob(&self, name: &str, value: &JsonValue) -> Result<(), PersistenceError> {
        let mut inner = self.inner.lock().map_err(|_| Self::poisoned(name))?;
        if inner.fail_saves {
            return Err(PersistenceError::Rejected {
                name: name.to_string(),
                reason: "saves are disabled".to_string(),
            });
        }
        inner.blobs.insert(name.to_string(), value.clone());
        inner.saves += 1;
        Ok(())
    }
}

// ============ FileStore ============

/// One `<name>.json` file per blob inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| PersistenceError::Io {
            name: dir.display().to_string(),
            source,
        })?;
        debug!(path = %dir.display(), "file store opened");
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::Rejected {
                name: name.to_string(),
                reason: "blob names may only contain letters, digits, '-' and '_'".to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

impl PersistenceGateway for FileStore {
    fn load_blob(&self, name: &str) -> Result<Option<JsonValue>, PersistenceError> {
        let path = self.path_for(name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    name: name.to_string(),
                    source,
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| PersistenceError::Serialization {
                name: name.to_string(),
                source,
            })
    }

    fn save_blob(&self, name: &str, value: &JsonValue) -> Result<(), PersistenceError> {
        let path = self.path_for(name)?;
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| PersistenceError::Serialization {
            name: name.to_string(),
            source,
        })?;

        // Write beside the target, then rename over it
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| PersistenceError::Io {
            name: name.to_string(),
            source,
        };
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        debug!(blob = name, path = %path.display(), "blob saved");
        Ok(())
    }
}
