//! Storage backend façade
//!
//! A single access-serializing front over the shared key-value blob store.
//! Values are JSON strings; every append-to-collection is a read-modify-write
//! sequence through this façade, which makes the non-atomicity of concurrent
//! writers explicit. Last-write-wins between processes is accepted behavior.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::AppResult;

/// Key-value blob store interface
#[cfg_attr(test, mockall::automock)]
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under `key`, if any
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove the value stored under `key`; removing an absent key is not an
    /// error
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// File-backed store: one `<key>.json` file per storage slot
pub struct FileBackend {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileBackend {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn new(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().expect("storage lock poisoned");

        match fs::read_to_string(self.slot_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().expect("storage lock poisoned");

        fs::write(self.slot_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.lock.lock().expect("storage lock poisoned");

        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.lock().expect("storage lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        assert_eq!(backend.get("problems").unwrap(), None);

        backend.put("problems", "[]").unwrap();
        assert_eq!(backend.get("problems").unwrap(), Some("[]".to_string()));

        backend.put("problems", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            backend.get("problems").unwrap(),
            Some(r#"[{"id":1}]"#.to_string())
        );

        backend.remove("problems").unwrap();
        assert_eq!(backend.get("problems").unwrap(), None);
    }

    #[test]
    fn test_file_backend_remove_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        assert!(backend.remove("never-written").is_ok());
    }

    #[test]
    fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();

        assert_eq!(backend.get("user").unwrap(), None);
        backend.put("user", r#"{"id":"u1"}"#).unwrap();
        assert_eq!(backend.get("user").unwrap(), Some(r#"{"id":"u1"}"#.to_string()));
        backend.remove("user").unwrap();
        backend.remove("user").unwrap();
        assert_eq!(backend.get("user").unwrap(), None);
    }
}
