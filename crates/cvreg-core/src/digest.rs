//! # Content Digest — Fixed-Length Hash Outputs
//!
//! Defines `ContentDigest` and `DigestAlgorithm`. Both the auxiliary-data
//! digest and the registration-payload digest are 32 bytes regardless of the
//! algorithm, so the digest type is a fixed array with an algorithm tag.

use serde::{Deserialize, Serialize};

/// Length in bytes of every digest produced in this workspace.
pub const DIGEST_LENGTH: usize = 32;

/// The hash algorithm used to produce a digest.
///
/// Cardano commits to auxiliary data with Blake2b-256, which is the default.
/// SHA-256 is kept for hosts that pair the builder with a different ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestAlgorithm {
    /// Blake2b with a 32-byte output, unkeyed.
    #[default]
    Blake2b256,
    /// SHA-256.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blake2b256 => "blake2b256",
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 32-byte digest with its algorithm tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw digest value.
    pub bytes: [u8; DIGEST_LENGTH],
}

impl ContentDigest {
    /// Create a digest from raw bytes and algorithm.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self { algorithm, bytes }
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.bytes
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        crate::hex::encode(&self.bytes)
    }
}

impl AsRef<[u8]> for ContentDigest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_algorithm_is_blake2b() {
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Blake2b256);
    }

    #[test]
    fn test_digest_display() {
        let d = ContentDigest::new(DigestAlgorithm::Blake2b256, [0xab; 32]);
        let s = d.to_string();
        assert!(s.starts_with("blake2b256:"));
        assert_eq!(s.len(), "blake2b256:".len() + 64);
    }

    #[test]
    fn test_algorithm_serde_names() {
        let json = serde_json::to_string(&DigestAlgorithm::Sha256).unwrap();
        assert_eq!(json, "\"sha256\"");
        let parsed: DigestAlgorithm = serde_json::from_str("\"blake2b256\"").unwrap();
        assert_eq!(parsed, DigestAlgorithm::Blake2b256);
    }

    #[test]
    fn test_digest_hex_lowercase() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xde;
        bytes[31] = 0x0f;
        let d = ContentDigest::new(DigestAlgorithm::Sha256, bytes);
        let hex = d.to_hex();
        assert!(hex.starts_with("de00"));
        assert!(hex.ends_with("0f"));
    }
}
