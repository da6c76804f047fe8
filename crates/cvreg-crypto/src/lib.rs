//! # cvreg-crypto — Cryptographic Collaborators
//!
//! Provides the two primitives the auxiliary-data hash builder treats as
//! external:
//!
//! - **Incremental hash contexts** (Blake2b-256 by default, SHA-256 optional)
//!   with `new` / `append` / `finalize`.
//! - **Ed25519** signing and verification over a 32-byte digest, standing in
//!   for the device's "sign these bytes" operation.
//!
//! ## Crate Policy
//!
//! - Depends only on `cvreg-core` internally.
//! - No mocking of cryptographic operations in tests.
//! - Private key material is never serialized or formatted.

pub mod ed25519;
pub mod hash;

pub use ed25519::{verify_digest, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use hash::{digest, HashContext};
