//! # Incremental Hash Contexts
//!
//! A `HashContext` accumulates bytes and yields a 32-byte [`ContentDigest`].
//! The algorithm is chosen at construction and recorded in the digest tag.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use cvreg_core::{ContentDigest, DigestAlgorithm, DIGEST_LENGTH};
use sha2::{Digest, Sha256};

type Blake2b256 = Blake2b<U32>;

#[derive(Clone)]
enum Hasher {
    Blake2b256(Blake2b256),
    Sha256(Sha256),
}

/// A running hash computation.
#[derive(Clone)]
pub struct HashContext {
    algorithm: DigestAlgorithm,
    hasher: Hasher,
}

impl HashContext {
    /// Start an empty hash computation.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        let hasher = match algorithm {
            DigestAlgorithm::Blake2b256 => Hasher::Blake2b256(Blake2b256::new()),
            DigestAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
        };
        Self { algorithm, hasher }
    }

    /// The algorithm this context computes.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Feed bytes into the computation.
    pub fn append(&mut self, data: &[u8]) {
        match &mut self.hasher {
            Hasher::Blake2b256(h) => h.update(data),
            Hasher::Sha256(h) => h.update(data),
        }
    }

    /// Produce the digest of everything appended so far.
    ///
    /// The context is left empty afterwards.
    pub fn finalize(&mut self) -> ContentDigest {
        let mut bytes = [0u8; DIGEST_LENGTH];
        match &mut self.hasher {
            Hasher::Blake2b256(h) => bytes.copy_from_slice(&std::mem::take(h).finalize()),
            Hasher::Sha256(h) => bytes.copy_from_slice(&std::mem::take(h).finalize()),
        }
        ContentDigest::new(self.algorithm, bytes)
    }
}

impl std::fmt::Debug for HashContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HashContext({})", self.algorithm)
    }
}

/// One-shot digest of a complete byte string.
pub fn digest(algorithm: DigestAlgorithm, data: &[u8]) -> ContentDigest {
    let mut ctx = HashContext::new(algorithm);
    ctx.append(data);
    ctx.finalize()
}
