use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use super::r#trait::{Storage, StorageError};

/// In-memory storage backend.
///
/// Intended for tests/dev: keeps a copy of the last saved collection for the
/// lifetime of the value.
#[derive(Debug)]
pub struct InMemoryStorage<K, V> {
    saved: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStorage<K, V> {
    pub fn new() -> Self {
        Self {
            saved: RwLock::new(HashMap::new()),
        }
    }

    /// Storage that already holds `entities`, as if saved by an earlier run.
    pub fn with_entries(entities: HashMap<K, V>) -> Self {
        Self {
            saved: RwLock::new(entities),
        }
    }
}

impl<K, V> Default for InMemoryStorage<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StorageError {
    StorageError::Io(std::io::Error::other("storage lock poisoned"))
}

impl<K, V> Storage<K, V> for InMemoryStorage<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn save_all(&self, entities: &HashMap<K, V>) -> Result<(), StorageError> {
        let mut saved = self.saved.write().map_err(|_| poisoned())?;
        *saved = entities.clone();
        Ok(())
    }

    fn read_all(&self) -> Result<HashMap<K, V>, StorageError> {
        let saved = self.saved.read().map_err(|_| poisoned())?;
        Ok(saved.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_returns_the_last_saved_collection() {
        let storage: InMemoryStorage<String, u32> = InMemoryStorage::new();
        assert!(storage.read_all().unwrap().is_empty());

        let mut first = HashMap::new();
        first.insert("a".to_string(), 1);
        first.insert("b".to_string(), 2);
        storage.save_all(&first).unwrap();

        let mut second = HashMap::new();
        second.insert("c".to_string(), 3);
        storage.save_all(&second).unwrap();

        assert_eq!(storage.read_all().unwrap(), second);
    }
}
