//! # Durable Storage
//!
//! A tiny key/value store that survives restarts, used for the list scroll
//! position. Lives at `~/.atlas/storage.json`.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) so a crash never
//! leaves a half-written file behind.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// String-keyed storage with string values.
pub trait Storage {
    /// Returns `None` when the key was never written or the store is unreadable.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Overwrites any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Returns `~/.atlas/storage.json`.
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".atlas").join("storage.json"))
}

/// JSON-file backed storage.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> BTreeMap<String, String> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read storage {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("Ignoring malformed storage {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut items = self.load();
        items.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, &items)?;
        debug!("Stored {}={} in {}", key, value, self.path.display());
        Ok(())
    }
}

/// In-process storage, for tests and when no home directory exists.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get_item("scrollposition"), None);
    }

    #[test]
    fn test_set_then_get_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let mut storage = FileStorage::new(path.clone());
        storage.set_item("scrollposition", "42").unwrap();

        let reopened = FileStorage::new(path);
        assert_eq!(reopened.get_item("scrollposition").as_deref(), Some("42"));
    }

    #[test]
    fn test_set_overwrites_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("storage.json"));
        storage.set_item("a", "1").unwrap();
        storage.set_item("scrollposition", "10").unwrap();
        storage.set_item("scrollposition", "20").unwrap();
        assert_eq!(storage.get_item("a").as_deref(), Some("1"));
        assert_eq!(storage.get_item("scrollposition").as_deref(), Some("20"));
        assert!(!dir.path().join("storage.tmp").exists());
    }

    #[test]
    fn test_malformed_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(path);
        assert_eq!(storage.get_item("scrollposition"), None);
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k"), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").as_deref(), Some("v"));
    }
}
