//! # Error Types
//!
//! Errors raised by canonical encoding and digest parsing. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error during canonical serialization or decoding.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value could not be represented as JSON or JCS serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// Bytes handed to the decoder were not valid JSON for the requested type.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Error parsing a textual content digest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// A SHA-256 digest is 64 hex characters.
    #[error("digest must be 64 hex chars, got {0}")]
    InvalidLength(usize),

    /// The digest contained a character outside `[0-9a-fA-F]`.
    #[error("invalid digest: non-hex input {0:?}")]
    InvalidHex(String),
}
