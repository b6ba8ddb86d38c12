//! Client-local key/value storage backends.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::repository::FormStorage;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Volatile storage, handy for tests and one-shot CLI runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a storage pre-seeded with one item.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::default();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl FormStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> RepositoryResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage persisted as one JSON object on disk.
///
/// A missing file reads as empty storage.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> RepositoryResult<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl FormStorage for FileStorage {
    fn get_item(&self, key: &str) -> RepositoryResult<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("hotelSearchForm").unwrap(), None);
        storage.set_item("hotelSearchForm", "{}").unwrap();
        assert_eq!(
            storage.get_item("hotelSearchForm").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get_item("anything").unwrap(), None);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileStorage::new(&path)
            .set_item("hotelSearchForm", r#"{"children_ages":[5]}"#)
            .unwrap();
        FileStorage::new(&path).set_item("other", "1").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get_item("hotelSearchForm").unwrap().as_deref(),
            Some(r#"{"children_ages":[5]}"#)
        );
        assert_eq!(reopened.get_item("other").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn file_storage_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStorage::new(&path).get_item("x"),
            Err(RepositoryError::Decode(_))
        ));
    }
}
