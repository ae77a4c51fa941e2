//! Whole-collection storage boundary.
//!
//! A repository hands its complete key → entity map to a [`Storage`] on
//! persist and replaces its map with whatever the storage returns on
//! initialize. Backends are interchangeable without repository changes.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
pub use r#trait::{Storage, StorageError};
