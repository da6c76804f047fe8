//! # cvreg-core — Foundational Types for Registration Hashing
//!
//! This crate is the leaf of the workspace. It defines the primitives every
//! other crate builds on when committing to a voter-registration auxiliary
//! data structure.
//!
//! ## Key Design Principles
//!
//! 1. **Canonical tokens only.** Every CBOR token that enters a digest is
//!    produced by [`cbor::encode_token`], which always picks the minimal
//!    argument width. There is no other way to produce token bytes.
//!
//! 2. **One field registry.** The metadata labels and payload map keys live in
//!    [`metadata`] and are shared by the outer and inner encodings. Independent
//!    verifiers re-encode with the same constants, so they never change.
//!
//! 3. **Contract violations are errors, not warnings.** [`ContractViolation`]
//!    describes an integration bug. Callers must abandon the operation.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cvreg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod cbor;
pub mod digest;
pub mod error;
pub mod hex;
pub mod metadata;

// Re-export primary types for ergonomic imports.
pub use cbor::{encode_token, CborType, EncodedToken};
pub use digest::{ContentDigest, DigestAlgorithm, DIGEST_LENGTH};
pub use error::{ContractViolation, CryptoError, CvregError, HexError};
pub use hex::HexBytes;
pub use metadata::{PayloadKey, RegistrationFormat};
