//! # World State Port
//!
//! The key-value store interface the host ledger supplies. The registry never
//! owns persisted state; it only talks to an implementation of this trait.
//!
//! Consistency, isolation of range scans, and commit/rollback all belong to
//! the implementation. Calls are single request, single response: the
//! registry awaits each one and propagates any error without retrying.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// The store call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Point read.
    Get,
    /// Point write.
    Put,
    /// Point delete.
    Delete,
    /// Range scan.
    Scan,
}

impl StoreOperation {
    /// Lowercase operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Scan => "scan",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure reported by the world state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("world state {operation} failed for key {key:?}: {message}")]
pub struct StoreError {
    /// Which call failed.
    pub operation: StoreOperation,
    /// The key involved (the start key for scans).
    pub key: String,
    /// Store-provided description.
    pub message: String,
}

impl StoreError {
    /// Build a store error.
    pub fn new(operation: StoreOperation, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation,
            key: key.into(),
            message: message.into(),
        }
    }
}

/// One key/value pair returned by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    /// The stored key.
    pub key: String,
    /// The stored bytes, unmodified.
    pub value: Vec<u8>,
}

/// Key-value world state supplied by the host.
#[async_trait]
pub trait WorldState: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Return every entry with `start_key <= key < end_key`, in store order.
    ///
    /// An empty `start_key` means "from the first key"; an empty `end_key`
    /// means "through the last key". `scan("", "")` covers the whole
    /// namespace. The result is fully materialized.
    async fn scan(&self, start_key: &str, end_key: &str) -> Result<Vec<StateEntry>, StoreError>;
}

#[async_trait]
impl<T: WorldState + ?Sized> WorldState for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key).await
    }

    async fn scan(&self, start_key: &str, end_key: &str) -> Result<Vec<StateEntry>, StoreError> {
        (**self).scan(start_key, end_key).await
    }
}
