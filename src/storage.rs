use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
};
use thiserror::Error;
use tracing::error;

pub const PROFILE_KEY: &str = "profile";
pub const LOGS_KEY: &str = "logs";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable string-valued key-value storage.
///
/// Every write replaces the whole value stored under the key.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key inside a data directory.
///
/// Reads and writes are blocking `std::fs` calls. The HTTP layer makes them
/// while holding the store lock, so requests queue behind a write; each write
/// is a single small file, replaced through a temp file and rename.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.key_path(key);
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, value)?;
        fs::rename(temp, path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process storage, used by tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Reads and parses the value under `key`.
///
/// A missing value, a failed read and a value that does not parse all yield
/// `None`. The last two are logged and otherwise treated as no prior data.
pub fn load_value<S, T>(storage: &S, key: &str) -> Option<T>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    match storage.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                error!(key, "failed to parse stored value: {err}");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            error!(key, "failed to read stored value: {err}");
            None
        }
    }
}

pub fn persist_value<S, T>(storage: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: Storage + ?Sized,
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value)?;
    storage.write(key, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("vitalife_storage_{}_{}", std::process::id(), nanos));
        path
    }

    #[test]
    fn file_storage_write_read_remove() {
        let dir = unique_dir();
        let mut storage = FileStorage::new(&dir);

        assert!(storage.read(LOGS_KEY).unwrap().is_none());

        storage.write(LOGS_KEY, "{}").unwrap();
        assert_eq!(storage.read(LOGS_KEY).unwrap().as_deref(), Some("{}"));
        assert!(dir.join("logs.json").exists());

        storage.write(LOGS_KEY, "{\"a\":1}").unwrap();
        assert_eq!(storage.read(LOGS_KEY).unwrap().as_deref(), Some("{\"a\":1}"));

        storage.remove(LOGS_KEY).unwrap();
        assert!(storage.read(LOGS_KEY).unwrap().is_none());
        storage.remove(LOGS_KEY).unwrap();

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn load_value_treats_corrupt_data_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.write(PROFILE_KEY, "{not json").unwrap();
        let loaded: Option<BTreeMap<String, u32>> = load_value(&storage, PROFILE_KEY);
        assert!(loaded.is_none());
    }

    #[test]
    fn load_value_treats_mismatched_shape_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.write(LOGS_KEY, "[1, 2, 3]").unwrap();
        let loaded: Option<BTreeMap<String, u32>> = load_value(&storage, LOGS_KEY);
        assert!(loaded.is_none());
    }

    #[test]
    fn persist_value_overwrites_whole_value() {
        let mut storage = MemoryStorage::new();
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1u32);
        persist_value(&mut storage, LOGS_KEY, &map).unwrap();

        map.clear();
        map.insert("b".to_string(), 2u32);
        persist_value(&mut storage, LOGS_KEY, &map).unwrap();

        let loaded: BTreeMap<String, u32> = load_value(&storage, LOGS_KEY).unwrap();
        assert_eq!(loaded, map);
    }
}
