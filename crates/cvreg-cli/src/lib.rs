//! # cvreg-cli — Registration Hashing Command-Line Interface
//!
//! ## Subcommands
//!
//! - `hash`: hash a registration JSON file, sign the payload digest, and
//!   print both digests with the signature
//! - `keygen`: derive the Ed25519 public key of a staking key seed
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to the domain crates and return serializable reports.
//! - Reports go to stdout as JSON; logs go to stderr.

pub mod hash;
pub mod keygen;

use anyhow::Context;
use cvreg_crypto::Ed25519KeyPair;

/// Build a key pair from a hex-encoded 32-byte seed.
pub fn keypair_from_seed(seed_hex: &str) -> anyhow::Result<Ed25519KeyPair> {
    Ed25519KeyPair::from_seed_hex(seed_hex)
        .context("staking key seed must be 32 hex-encoded bytes")
}
