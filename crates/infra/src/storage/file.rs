use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::r#trait::{Storage, StorageError};

/// File-backed storage: the whole collection lives in one JSON document.
///
/// Writes go to `<path>.tmp` first and are renamed over the target, so a crash
/// mid-write leaves the previous document in place. A missing, blank or
/// truncated file reads back as an empty collection; anything else that fails
/// to decode is reported.
#[derive(Debug, Clone)]
pub struct FileStorage<K, V> {
    path: PathBuf,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V> FileStorage<K, V> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entries: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

impl<K, V> Storage<K, V> for FileStorage<K, V>
where
    K: Serialize + DeserializeOwned + Eq + Hash,
    V: Serialize + DeserializeOwned,
{
    fn save_all(&self, entities: &HashMap<K, V>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(entities)?;
        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = entities.len(), "collection saved");
        Ok(())
    }

    fn read_all(&self) -> Result<HashMap<K, V>, StorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no storage file yet; starting empty");
            return Ok(HashMap::new());
        }

        let bytes = fs::read(&self.path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(path = %self.path.display(), "storage file is empty");
            return Ok(HashMap::new());
        }

        let document: JsonValue = match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(e) if e.is_eof() => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "storage file is truncated; treating as empty"
                );
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        if !document.is_object() {
            return Err(StorageError::UnexpectedContent(format!(
                "{} does not hold a keyed collection",
                self.path.display()
            )));
        }

        let entities: HashMap<K, V> = serde_json::from_value(document)?;
        tracing::debug!(path = %self.path.display(), count = entities.len(), "collection loaded");
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bankledger_core::{CustomerId, Entity};
    use bankledger_ledger::Customer;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("bankledger-file-storage-{}", uuid::Uuid::now_v7()))
    }

    fn sample() -> HashMap<CustomerId, Customer> {
        let ottokar = Customer::new("Ottokar Domma", "Leipzig").unwrap();
        let lieselotte = Customer::new("Lieselotte Scharfsinnig", "Hamburg").unwrap();
        [ottokar, lieselotte]
            .into_iter()
            .map(|c| (*c.id(), c))
            .collect()
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let storage: FileStorage<CustomerId, Customer> =
            FileStorage::new(scratch_dir().join("customers.json"));
        assert!(storage.read_all().unwrap().is_empty());
    }

    #[test]
    fn blank_file_reads_as_empty() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("customers.json");
        fs::write(&path, "  \n").unwrap();

        let storage: FileStorage<CustomerId, Customer> = FileStorage::new(&path);
        assert!(storage.read_all().unwrap().is_empty());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn save_creates_directories_and_round_trips() {
        let dir = scratch_dir();
        let path = dir.join("nested").join("customers.json");
        let storage = FileStorage::new(&path);

        let customers = sample();
        storage.save_all(&customers).unwrap();

        assert!(path.exists());
        assert!(!storage.temp_path().exists());
        assert_eq!(storage.read_all().unwrap(), customers);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn save_replaces_previous_content() {
        let dir = scratch_dir();
        let storage = FileStorage::new(dir.join("customers.json"));

        storage.save_all(&sample()).unwrap();
        storage.save_all(&HashMap::new()).unwrap();

        assert!(storage.read_all().unwrap().is_empty());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn truncated_file_reads_as_empty() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("customers.json");
        fs::write(&path, r#"{"0190a0a0-0000-7000-8000-000000000000": {"id": "#).unwrap();

        let storage: FileStorage<CustomerId, Customer> = FileStorage::new(&path);
        assert!(storage.read_all().unwrap().is_empty());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn corrupt_content_is_reported() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("customers.json");
        let storage: FileStorage<CustomerId, Customer> = FileStorage::new(&path);

        fs::write(&path, "definitely not json").unwrap();
        assert!(matches!(storage.read_all(), Err(StorageError::Serialization(_))));

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(storage.read_all(), Err(StorageError::UnexpectedContent(_))));

        fs::write(&path, r#"{"not-a-uuid": {"name": "x"}}"#).unwrap();
        assert!(matches!(storage.read_all(), Err(StorageError::Serialization(_))));
        fs::remove_dir_all(dir).unwrap();
    }
}
