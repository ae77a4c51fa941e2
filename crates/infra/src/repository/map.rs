use std::collections::HashMap;

use bankledger_core::Entity;

use super::Repository;
use crate::storage::{Storage, StorageError};

/// Map-backed repository, generic over the entity and its storage strategy.
///
/// One implementation serves every entity kind; only `T` and `S` change.
#[derive(Debug)]
pub struct MapRepository<T: Entity, S> {
    entities: HashMap<T::Id, T>,
    storage: S,
}

impl<T, S> MapRepository<T, S>
where
    T: Entity,
    S: Storage<T::Id, T>,
{
    /// Empty repository; call [`Repository::initialize`] to load stored state.
    pub fn new(storage: S) -> Self {
        Self {
            entities: HashMap::new(),
            storage,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<T, S> Repository<T> for MapRepository<T, S>
where
    T: Entity,
    S: Storage<T::Id, T>,
{
    fn save(&mut self, entity: T) {
        self.entities.insert(entity.id().clone(), entity);
    }

    fn find_by_id(&self, id: &T::Id) -> Option<&T> {
        self.entities.get(id)
    }

    fn find_by_id_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.entities.get_mut(id)
    }

    fn find_all(&self) -> Vec<&T> {
        self.entities.values().collect()
    }

    fn contains(&self, id: &T::Id) -> bool {
        self.entities.contains_key(id)
    }

    fn delete_by_id(&mut self, id: &T::Id) -> Option<T> {
        self.entities.remove(id)
    }

    fn delete_all(&mut self) {
        self.entities.clear();
    }

    fn count(&self) -> usize {
        self.entities.len()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.save_all(&self.entities)?;
        tracing::debug!(count = self.entities.len(), "repository persisted");
        Ok(())
    }

    fn initialize(&mut self) -> Result<(), StorageError> {
        self.entities = self.storage.read_all()?;
        tracing::debug!(count = self.entities.len(), "repository initialized");
        Ok(())
    }
}
