//! Blob store port for provider persistence.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store holding opaque serialized blobs in named slots.
///
/// The registry treats the store as a best-effort durability shadow: failures
/// are logged by the caller and never change in-memory state.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob in `key`, returning `None` when the slot is empty.
    async fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the blob in `key`.
    async fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the slot entirely. Removing an empty slot succeeds.
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Errors returned by blob store adapters.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The slot name cannot be mapped onto the storage medium.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Adapter state is unusable after a panic in another thread.
    #[error("storage state poisoned: {0}")]
    Poisoned(String),

    /// Storage medium failure.
    #[error("storage I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
