//! Blob storage for boards and settings.
//!
//! Everything is stored as JSON text under a handful of string keys, see
//! [`keys`]. [`FileStore`] keeps one `{key}.json` file per key in a
//! directory; [`MemoryStore`] keeps them in a map.

use crate::error::{BoardError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage keys
pub mod keys {
    /// Array of board metadata
    pub const BOARDS: &str = "boards";
    /// Name of the board that was open last
    pub const CURRENT: &str = "current";
    /// Application settings object
    pub const SETTINGS: &str = "settings";

    /// Array of task records for one board
    pub fn tasks(board: &str) -> String {
        format!("tasks-{board}")
    }
}

/// A key/value store of text blobs
pub trait BlobStore {
    /// Read a blob, `None` if the key was never set
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a blob, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a blob; deleting a missing key succeeds
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Read and parse a JSON blob
pub fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: BlobStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| BoardError::Corrupt {
                key: key.to_string(),
                source,
            }),
    }
}

/// Serialize a value and store it as JSON
pub fn write_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    S: BlobStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// In-memory store, for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.blobs.keys().map(String::as_str)
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// Directory of `{key}.json` files
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `base_dir`; the directory is created on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BoardError::storage(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .map_err(|e| BoardError::storage(&self.base_dir, e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| BoardError::storage(&path, e))?;
        debug!("Wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BoardError::storage(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("boards").unwrap(), None);

        store.set("boards", "[]").unwrap();
        assert_eq!(store.get("boards").unwrap().as_deref(), Some("[]"));

        store.remove("boards").unwrap();
        store.remove("boards").unwrap();
        assert_eq!(store.get("boards").unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_directory() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("nested").join("data"));

        store.set(&keys::tasks("Home"), "[]").unwrap();

        assert!(temp.path().join("nested/data/tasks-Home.json").exists());
        assert_eq!(store.get("tasks-Home").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_missing_key() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        assert_eq!(store.get("current").unwrap(), None);
        store.remove("current").unwrap();
    }

    #[test]
    fn test_corrupt_blob() {
        let mut store = MemoryStore::new();
        store.set("settings", "{not json").unwrap();

        let result: Result<Option<Vec<u32>>> = read_json(&store, "settings");
        assert!(matches!(result, Err(BoardError::Corrupt { ref key, .. }) if key == "settings"));
    }

    #[test]
    fn test_json_helpers() {
        let mut store = MemoryStore::new();
        write_json(&mut store, "current", "Home").unwrap();

        let current: Option<String> = read_json(&store, "current").unwrap();
        assert_eq!(current.as_deref(), Some("Home"));
    }
}
