//! Key/value persistence
//!
//! Backends:
//! - `MemoryStorage`: in-process map (native builds, tests)
//! - `LocalStorage`: browser LocalStorage (wasm32 only)
//!
//! Reads that fail or hold unparseable data fall back to defaults and writes
//! that fail are logged and dropped. Nothing here ever reaches the simulation.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value
pub fn read_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>, StorageError> {
    match storage.get(key)? {
        Some(json) => serde_json::from_str(&json).map(Some).map_err(StorageError::Decode),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn write_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(StorageError::Encode)?;
    storage.set(key, &json)
}

/// Read a JSON value, falling back to `T::default()` on any failure
pub fn load_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    match read_json(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Ignoring stored {}: {}", key, e);
            T::default()
        }
    }
}

/// Write a JSON value, logging instead of failing
pub fn save_quietly<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) {
    if let Err(e) = write_json(storage, key, value) {
        log::warn!("Failed to save {}: {}", key, e);
    }
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser LocalStorage backend
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open the window's LocalStorage, if the browser allows it
    pub fn open() -> Result<Self, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(|inner| Self { inner })
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend whose every call fails
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                reason: "disk on fire".into(),
            })
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "disk on fire".into(),
            })
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_json_roundtrip_through_memory() {
        let mut storage = MemoryStorage::new();
        write_json(&mut storage, "k", &vec![1u32, 2, 3]).unwrap();
        let back: Option<Vec<u32>> = read_json(&storage, "k").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "{not json").unwrap();
        assert!(matches!(read_json::<u32>(&storage, "k"), Err(StorageError::Decode(_))));
        assert_eq!(load_or_default::<u32>(&storage, "k"), 0);
    }

    #[test]
    fn test_broken_backend_is_harmless() {
        let mut storage = BrokenStorage;
        assert_eq!(load_or_default::<Vec<u32>>(&storage, "k"), Vec::<u32>::new());
        save_quietly(&mut storage, "k", &5u32);
    }
}
