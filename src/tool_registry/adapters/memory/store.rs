//! In-memory blob store for registry tests and embedding.

use crate::tool_registry::ports::{BlobStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory blob store.
///
/// Clones share the same slots, so a test can keep a handle while the
/// registry owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    slots: HashMap<String, String>,
    fail_writes: bool,
    write_count: usize,
}

impl InMemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one pre-populated slot.
    #[must_use]
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.slots.insert(key.into(), value.into());
        }
        store
    }

    /// Makes subsequent writes and removals fail with an I/O error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when lock acquisition fails.
    pub fn set_fail_writes(&self, fail: bool) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        state.fail_writes = fail;
        Ok(())
    }

    /// Returns the raw content of a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when lock acquisition fails.
    pub fn snapshot(&self, key: &str) -> StoreResult<Option<String>> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        Ok(state.slots.get(key).cloned())
    }

    /// Returns how many writes and removals succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when lock acquisition fails.
    pub fn write_count(&self) -> StoreResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        Ok(state.write_count)
    }
}

fn injected_failure() -> StoreError {
    StoreError::from(std::io::Error::other("injected write failure"))
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        self.snapshot(key)
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        if state.fail_writes {
            return Err(injected_failure());
        }
        state.slots.insert(key.to_owned(), value.to_owned());
        state.write_count += 1;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        if state.fail_writes {
            return Err(injected_failure());
        }
        state.slots.remove(key);
        state.write_count += 1;
        Ok(())
    }
}
