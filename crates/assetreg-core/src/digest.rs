//! # Content Digest
//!
//! SHA-256 digests over canonical bytes. Nodes that executed the same
//! transactions compare world state by comparing these digests.
//!
//! `ContentDigest` can only be computed from `CanonicalBytes`; the signature
//! of [`sha256_digest()`] is what enforces it.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::DigestError;

/// Prefix used by the `Display` form of a digest.
const SHA256_PREFIX: &str = "sha256:";

/// A SHA-256 content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Wrap a raw 32-byte digest.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from 64 hex characters, with or without the
    /// `sha256:` prefix produced by `Display`.
    pub fn from_hex(s: &str) -> Result<Self, DigestError> {
        let s = s.trim();
        let s = s.strip_prefix(SHA256_PREFIX).unwrap_or(s);
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DigestError::InvalidHex(s.to_string()));
        }
        if s.len() != 64 {
            return Err(DigestError::InvalidLength(s.len()));
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| DigestError::InvalidHex(s.to_string()))?;
        }
        Ok(Self { bytes })
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SHA256_PREFIX}{}", self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_sha256_digest_deterministic() {
        let mut data = BTreeMap::new();
        data.insert("a", 1);
        data.insert("b", 2);
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(sha256_digest(&cb), sha256_digest(&cb));
    }

    #[test]
    fn test_to_hex_format() {
        let cb = CanonicalBytes::new(&serde_json::json!({"key": "value"})).unwrap();
        let hex = sha256_digest(&cb).to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_content_digest_display() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1})).unwrap();
        let s = sha256_digest(&cb).to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
    }

    #[test]
    fn test_different_inputs_different_digests() {
        let cb1 = CanonicalBytes::new(&serde_json::json!({"a": 1})).unwrap();
        let cb2 = CanonicalBytes::new(&serde_json::json!({"a": 2})).unwrap();
        assert_ne!(sha256_digest(&cb1), sha256_digest(&cb2));
    }

    #[test]
    fn test_known_sha256_vector() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert_eq!(
            sha256_digest(&cb).to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_from_hex_accepts_display_form() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1})).unwrap();
        let digest = sha256_digest(&cb);
        assert_eq!(ContentDigest::from_hex(&digest.to_string()).unwrap(), digest);
        assert_eq!(ContentDigest::from_hex(&digest.to_hex()).unwrap(), digest);
    }

    #[test]
    fn test_from_hex_rejects_short_input() {
        assert_eq!(
            ContentDigest::from_hex("abc123"),
            Err(DigestError::InvalidLength(6))
        );
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        let err = ContentDigest::from_hex(&"z".repeat(64)).unwrap_err();
        assert!(matches!(err, DigestError::InvalidHex(_)));
        let err = ContentDigest::from_hex(&"\u{00e9}".repeat(32)).unwrap_err();
        assert!(matches!(err, DigestError::InvalidHex(_)));
    }
}
