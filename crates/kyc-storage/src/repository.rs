//! List repositories
//!
//! A repository maps a key to a list of strings, stored as plain JSON text
//! and overwritten wholesale on every write.

use crate::error::StorageError;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Durable key → list store
pub trait ListRepository: Send + Sync + Debug {
    /// Read the list stored under `key` (empty if absent)
    ///
    /// # Errors
    /// Returns error if the backing store cannot be read or decoded
    fn get(&self, key: &str) -> Result<Vec<String>, StorageError>;

    /// Replace the list stored under `key`
    ///
    /// # Errors
    /// Returns error if the backing store cannot be written
    fn put(&self, key: &str, values: &[String]) -> Result<(), StorageError>;

    /// Delete `key` (no-op if absent)
    ///
    /// # Errors
    /// Returns error if the backing store cannot be written
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All keys currently stored
    ///
    /// # Errors
    /// Returns error if the backing store cannot be listed
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Repository shared between stores
pub type SharedRepository = Arc<dyn ListRepository>;

/// Read a list, treating any failure as an empty list
pub(crate) fn load_or_empty(repo: &dyn ListRepository, key: &str) -> Vec<String> {
    match repo.get(key) {
        Ok(values) => values,
        Err(err) => {
            tracing::error!(key, error = %err, "failed to read stored list");
            Vec::new()
        }
    }
}

/// Write a list, dropping the write on failure
pub(crate) fn store_or_drop(repo: &dyn ListRepository, key: &str, values: &[String]) {
    if let Err(err) = repo.put(key, values) {
        tracing::error!(key, error = %err, "failed to write stored list");
    }
}

fn decode(key: &str, text: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(text).map_err(|e| StorageError::malformed(key, e))
}

fn encode(key: &str, values: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(values).map_err(|e| StorageError::malformed(key, e))
}

/// In-memory repository
///
/// Holds the serialized text, so decode failures behave the same as on disk.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryRepository {
    /// Create empty repository
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under a key, bypassing encoding
    pub fn put_raw(&self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.write().insert(key.into(), text.into());
    }

    /// Raw text stored under a key
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }
}

impl ListRepository for MemoryRepository {
    fn get(&self, key: &str) -> Result<Vec<String>, StorageError> {
        match self.entries.read().get(key) {
            Some(text) => decode(key, text),
            None => Ok(Vec::new()),
        }
    }

    fn put(&self, key: &str, values: &[String]) -> Result<(), StorageError> {
        let text = encode(key, values)?;
        self.entries.write().insert(key.to_string(), text);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

/// File-backed repository: one `{key}.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileRepository {
    root: PathBuf,
}

impl FileRepository {
    const EXTENSION: &'static str = "json";

    /// Open repository rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    /// Returns error if the directory cannot be created
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| StorageError::io_error(&root, e))?;
        Ok(Self { root })
    }

    /// Directory holding the key files
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.{}", Self::EXTENSION)))
    }
}

impl ListRepository for FileRepository {
    fn get(&self, key: &str) -> Result<Vec<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => decode(key, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }

    fn put(&self, key: &str, values: &[String]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let text = encode(key, values)?;
        std::fs::write(&path, text).map_err(|e| StorageError::io_error(path, e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let entries =
            std::fs::read_dir(&self.root).map_err(|e| StorageError::io_error(&self.root, e))?;
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io_error(&self.root, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(Self::EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn memory_get_missing_is_empty() {
        let repo = MemoryRepository::new();
        assert!(repo.get("nothing").unwrap().is_empty());
    }

    #[test]
    fn memory_put_get() {
        let repo = MemoryRepository::new();
        repo.put("k", &strings(&["a", "b"])).unwrap();
        assert_eq!(repo.get("k").unwrap(), strings(&["a", "b"]));
        assert_eq!(repo.raw("k").unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn memory_malformed_text() {
        let repo = MemoryRepository::new();
        repo.put_raw("k", "{not json");
        assert!(matches!(repo.get("k"), Err(StorageError::Malformed { .. })));
    }

    #[test]
    fn load_or_empty_swallows_errors() {
        let repo = MemoryRepository::new();
        repo.put_raw("k", "42");
        assert!(load_or_empty(&repo, "k").is_empty());
    }

    #[test]
    fn file_roundtrip_and_keys() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileRepository::open(dir.path().join("store")).unwrap();

        repo.put("customPositions", &strings(&["Treasurer"])).unwrap();
        repo.put("autocomplete_history_city", &strings(&["Zug", "Basel"]))
            .unwrap();

        assert_eq!(repo.get("customPositions").unwrap(), strings(&["Treasurer"]));
        assert_eq!(
            repo.keys().unwrap(),
            strings(&["autocomplete_history_city", "customPositions"])
        );

        repo.remove("customPositions").unwrap();
        assert!(repo.get("customPositions").unwrap().is_empty());
        // Removing twice is fine
        repo.remove("customPositions").unwrap();
    }

    #[test]
    fn file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileRepository::open(dir.path()).unwrap();

        assert!(matches!(repo.get("../escape"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(repo.put("", &[]), Err(StorageError::InvalidKey(_))));
    }
}
