//! In-memory preference store.
//!
//! Implements [`StoragePort`] over a `HashMap`. Used on the host and as the
//! fallback when the browser refuses local storage. Can also be built in an
//! "unavailable" state to exercise the failure paths.

use std::collections::HashMap;

use crate::app::ports::{StorageError, StoragePort};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    available: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
        }
    }

    /// A store whose every operation fails with
    /// [`StorageError::Unavailable`].
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            available: false,
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.remove(key);
        Ok(())
    }
}
