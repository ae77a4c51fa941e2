//! Infrastructure layer: durable storage strategies and keyed repositories.

pub mod repository;
pub mod storage;

pub use repository::{MapRepository, Repository};
pub use storage::{FileStorage, InMemoryStorage, Storage, StorageError};
