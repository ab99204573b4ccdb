//! Key-value persistence backends
//!
//! Repositories persist whole documents under a fixed key: every write
//! replaces the full blob (last write wins, no partial updates).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{SpendError, SpendResult};

use super::file_io::{read_blob, remove_blob, write_blob_atomic};

/// A synchronous store of serialized blobs
pub trait KeyValueStore {
    /// Fetch the blob stored under `key`, `None` when absent
    fn get(&self, key: &str) -> SpendResult<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value
    fn set(&self, key: &str, blob: &str) -> SpendResult<()>;

    /// Delete the blob under `key`; deleting an absent key succeeds
    fn remove(&self, key: &str) -> SpendResult<()>;
}

/// In-process backend, one independent map per instance
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob without going through `set`
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let store = Self::new();
        store.blobs.borrow_mut().insert(key.to_string(), blob.to_string());
        store
    }

    /// Make every subsequent `set` fail (exercises best-effort persistence)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SpendResult<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> SpendResult<()> {
        if self.fail_writes.get() {
            return Err(SpendError::Storage(format!("Write rejected for key '{}'", key)));
        }
        self.blobs.borrow_mut().insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SpendResult<()> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}

/// Filesystem backend storing each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> SpendResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SpendError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> SpendResult<Option<String>> {
        read_blob(self.path_for(key)?)
    }

    fn set(&self, key: &str, blob: &str) -> SpendResult<()> {
        write_blob_atomic(self.path_for(key)?, blob)
    }

    fn remove(&self, key: &str) -> SpendResult<()> {
        remove_blob(self.path_for(key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("expenses").unwrap(), None);

        store.set("expenses", "[]").unwrap();
        assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[]"));

        store.set("expenses", "[1]").unwrap();
        assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[1]"));

        store.remove("expenses").unwrap();
        assert_eq!(store.get("expenses").unwrap(), None);
        store.remove("expenses").unwrap();
    }

    #[test]
    fn test_memory_store_contract() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store_contract() {
        let temp_dir = TempDir::new().unwrap();
        exercise(&FileStore::new(temp_dir.path().to_path_buf()));
    }

    #[test]
    fn test_memory_stores_are_independent() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        a.set("expenses", "[1]").unwrap();
        assert_eq!(b.get("expenses").unwrap(), None);
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.set("expenses", "[]").is_err());
        store.set_fail_writes(false);
        assert!(store.set("expenses", "[]").is_ok());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());
        assert!(store.set("../escape", "{}").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        FileStore::new(temp_dir.path().to_path_buf())
            .set("categories", "[]")
            .unwrap();

        let reopened = FileStore::new(temp_dir.path().to_path_buf());
        assert_eq!(reopened.get("categories").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("categories.json").exists());
    }
}
