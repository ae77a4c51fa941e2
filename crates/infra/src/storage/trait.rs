use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

/// Storage operation error.
///
/// These are **infrastructure errors** (I/O, decoding) as opposed to domain
/// errors. A storage target that does not exist yet is not an error: backends
/// report it as an empty collection.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unexpected storage content: {0}")]
    UnexpectedContent(String),
}

/// Durable storage strategy for a complete keyed collection.
///
/// ## Semantics
///
/// `save_all()`:
/// - replaces whatever was stored before with the given map (no merging)
///
/// `read_all()`:
/// - returns the last saved map
/// - returns an empty map if nothing was saved yet (first run)
/// - fails on anything it cannot decode; corrupt data is never dropped silently
pub trait Storage<K, V>: Send + Sync {
    fn save_all(&self, entities: &HashMap<K, V>) -> Result<(), StorageError>;

    fn read_all(&self) -> Result<HashMap<K, V>, StorageError>;
}

impl<K, V, S> Storage<K, V> for Arc<S>
where
    S: Storage<K, V> + ?Sized,
{
    fn save_all(&self, entities: &HashMap<K, V>) -> Result<(), StorageError> {
        (**self).save_all(entities)
    }

    fn read_all(&self) -> Result<HashMap<K, V>, StorageError> {
        (**self).read_all()
    }
}

impl<K, V, S> Storage<K, V> for Box<S>
where
    S: Storage<K, V> + ?Sized,
{
    fn save_all(&self, entities: &HashMap<K, V>) -> Result<(), StorageError> {
        (**self).save_all(entities)
    }

    fn read_all(&self) -> Result<HashMap<K, V>, StorageError> {
        (**self).read_all()
    }
}
