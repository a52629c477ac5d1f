// file: src/store/mod.rs
// description: key-value store abstraction backing document persistence
// reference: internal module structure

pub mod file;
pub mod memory;

use crate::error::StoreResult;
use serde::{Deserialize, Serialize};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Synchronous string store, the shape of a browser's local storage.
///
/// Implementations may be unavailable or hold garbage; callers decide how
/// to degrade.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// Names of the two entries the repository owns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageKeys {
    pub documents: String,
    pub current: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            documents: "mdpad-documents".to_string(),
            current: "mdpad-current-document".to_string(),
        }
    }
}
