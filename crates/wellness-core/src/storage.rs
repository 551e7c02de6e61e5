//! Key/value persistence for the journal, checklists and yoga history.
//!
//! Every value is a whole JSON document stored under a string key. Writes
//! replace the previous document entirely; there are no transactions and the
//! last writer wins.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::WellnessError;
use crate::WellnessResult;

/// Minimal storage contract: raw string documents addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> WellnessResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> WellnessResult<()>;
    fn remove(&self, key: &str) -> WellnessResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> WellnessResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> WellnessResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> WellnessResult<()> {
        (**self).remove(key)
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a data directory.
    pub fn open(root: impl AsRef<Path>) -> WellnessResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            WellnessError::Storage(format!("Failed to create '{}': {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> WellnessResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> WellnessResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            debug!(key, "no stored document");
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|e| {
            WellnessError::Storage(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        debug!(key, bytes = contents.len(), "read stored document");
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> WellnessResult<()> {
        let path = self.path_for(key)?;
        fs::write(&path, value).map_err(|e| {
            WellnessError::Storage(format!("Failed to write '{}': {}", path.display(), e))
        })?;
        debug!(key, bytes = value.len(), "wrote stored document");
        Ok(())
    }

    fn remove(&self, key: &str) -> WellnessResult<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> WellnessResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> WellnessResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> WellnessResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Typed helpers
// ---------------------------------------------------------------------------

/// Load and deserialise a document. A missing key yields `None`; a document
/// that no longer parses is logged and treated as missing.
pub fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> WellnessResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "stored document is unreadable, ignoring it");
            Ok(None)
        }
    }
}

/// Serialise and replace a document.
pub fn save_json<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> WellnessResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

fn validate_key(key: &str) -> WellnessResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(WellnessError::InvalidInput {
            field: "key".into(),
            reason: format!("Storage key '{key}' may only contain letters, digits, '-' and '_'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        save_json(&store, "numbers", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<i32>> = load_json(&store, "numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
        assert!(dir.path().join("numbers.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
    }

    #[test]
    fn test_corrupt_document_treated_as_missing() {
        let store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();
        let loaded: Option<Vec<i32>> = load_json(&store, "broken").unwrap();
        assert!(loaded.is_none());
    }
}
