//! Keyed entity repositories.
//!
//! Repositories work purely on an in-memory map keyed by each entity's own
//! identifier. Durability is delegated to a [`Storage`](crate::storage::Storage)
//! strategy at explicit checkpoints (`persist` / `initialize`).

pub mod map;

pub use map::MapRepository;

use bankledger_core::Entity;

use crate::storage::StorageError;

/// CRUD over a keyed collection plus whole-collection persistence.
pub trait Repository<T: Entity> {
    /// Insert or overwrite by `entity.id()` (last write wins).
    fn save(&mut self, entity: T);

    fn find_by_id(&self, id: &T::Id) -> Option<&T>;

    fn find_by_id_mut(&mut self, id: &T::Id) -> Option<&mut T>;

    /// Snapshot of all entities, in no particular order.
    fn find_all(&self) -> Vec<&T>;

    fn contains(&self, id: &T::Id) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Remove the entry keyed by `entity.id()`.
    fn delete(&mut self, entity: &T) -> Option<T> {
        self.delete_by_id(entity.id())
    }

    fn delete_by_id(&mut self, id: &T::Id) -> Option<T>;

    fn delete_all(&mut self);

    fn count(&self) -> usize;

    /// Hand the complete collection to the storage strategy.
    fn persist(&self) -> Result<(), StorageError>;

    /// Replace the in-memory collection wholesale with the stored one.
    fn initialize(&mut self) -> Result<(), StorageError>;
}
