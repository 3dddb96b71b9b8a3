//! # assetreg-core — Canonical Encoding for the Asset Registry
//!
//! This crate is the leaf of the workspace. It defines the one property the
//! registry must never get wrong: every value written to world state is
//! produced by the same deterministic encoder, so independent nodes executing
//! the same transaction write byte-identical state.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All state writes flow through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for stored
//!    values. The private inner field makes the wrong path unrepresentable.
//!
//! 2. **Invertible encoding.** [`canonical::decode`] parses canonical output
//!    back into a JSON value, and re-encoding that value reproduces the same
//!    bytes.
//!
//! 3. **`sha256_digest()` accepts only `&CanonicalBytes`.** State hashes are
//!    computed over canonical bytes or not at all.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `assetreg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use canonical::{decode, CanonicalBytes};
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, DigestError};
