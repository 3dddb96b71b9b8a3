//! # Registry Errors
//!
//! Every error aborts the current transaction. Existence failures are
//! explicit variants the caller can match on; store failures pass through
//! unmodified.

use assetreg_core::{CanonicalizationError, DigestError};
use thiserror::Error;

use crate::world_state::StoreError;

/// Error returned by an `AssetRegistry` transaction handler.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// `create_asset` on an id that already holds a record.
    #[error("the asset {0} already exists")]
    AlreadyExists(String),

    /// Read, update, delete or transfer on an id with no record.
    #[error("the asset {0} does not exist")]
    NotFound(String),

    /// The world state reported a failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A record could not be canonically encoded.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Stored bytes could not be read as the expected record.
    #[error("stored record {id} is corrupt: {reason}")]
    CorruptRecord {
        /// Key of the unreadable record.
        id: String,
        /// What went wrong while reading it.
        reason: String,
    },

    /// A digest handed in for comparison is not a SHA-256 digest.
    #[error("invalid digest: {0}")]
    InvalidDigest(#[from] DigestError),
}

impl RegistryError {
    /// Whether the error is an existence check failure rather than a fault.
    pub fn is_existence_failure(&self) -> bool {
        matches!(self, Self::AlreadyExists(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_state::StoreOperation;

    #[test]
    fn existence_failures() {
        assert!(RegistryError::NotFound("a".into()).is_existence_failure());
        assert!(RegistryError::AlreadyExists("a".into()).is_existence_failure());
        let store = StoreError::new(StoreOperation::Get, "a", "boom");
        assert!(!RegistryError::from(store).is_existence_failure());
        assert!(!RegistryError::from(DigestError::InvalidLength(3)).is_existence_failure());
    }

    #[test]
    fn store_errors_pass_through_unchanged() {
        let store = StoreError::new(StoreOperation::Delete, "asset9", "read-only");
        let err = RegistryError::from(store.clone());
        assert_eq!(err.to_string(), store.to_string());
    }
}
