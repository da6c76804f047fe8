//! # Hash Subcommand
//!
//! Reads a registration, streams it through the auxiliary-data hash builder,
//! signs the payload digest with the staking key, and reports the result.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use cvreg_auxdata::{hash_registration, VoteRegistration};
use cvreg_core::{DigestAlgorithm, HexBytes};
use cvreg_crypto::Ed25519PublicKey;
use serde::Serialize;

use crate::keypair_from_seed;

/// Arguments for the hash subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Registration JSON file.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Digest algorithm for both digests.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Blake2b256)]
    pub algorithm: AlgorithmArg,

    /// Hex-encoded 32-byte Ed25519 seed of the staking key.
    #[arg(long)]
    pub seed: String,
}

/// Digest algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    #[value(name = "blake2b256")]
    Blake2b256,
    #[value(name = "sha256")]
    Sha256,
}

impl From<AlgorithmArg> for DigestAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Blake2b256 => DigestAlgorithm::Blake2b256,
            AlgorithmArg::Sha256 => DigestAlgorithm::Sha256,
        }
    }
}

/// Output of the hash subcommand.
#[derive(Debug, Serialize)]
pub struct HashReport {
    /// Algorithm of both digests.
    pub algorithm: DigestAlgorithm,
    /// Hex digest of `{61284: payload}`, the message that was signed.
    pub payload_hash: String,
    /// Hex digest of the complete auxiliary data.
    pub aux_data_hash: String,
    /// Signature over the payload digest.
    pub signature: HexBytes,
    /// Public key of the signing seed.
    pub public_key: Ed25519PublicKey,
}

/// Hash and sign the registration described by `args`.
pub fn run(args: &HashArgs) -> anyhow::Result<HashReport> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let registration: VoteRegistration =
        serde_json::from_str(&raw).context("parsing registration JSON")?;
    let keypair = keypair_from_seed(&args.seed)?;
    let public_key = keypair.public_key();

    if registration.staking_key.as_slice() != public_key.as_bytes() {
        tracing::warn!(
            staking_key = %registration.staking_key.to_hex(),
            signer = %public_key,
            "signing key does not match the registration staking key"
        );
    }

    let digests = hash_registration(&registration, args.algorithm.into(), |payload_hash| {
        Ok(keypair.sign_digest(payload_hash).as_bytes().to_vec())
    })
    .context("hashing registration")?;

    tracing::info!(
        format = %registration.format(),
        aux_data_hash = %digests.aux_data_hash,
        "registration hashed"
    );

    Ok(HashReport {
        algorithm: digests.aux_data_hash.algorithm,
        payload_hash: digests.payload_hash.to_hex(),
        aux_data_hash: digests.aux_data_hash.to_hex(),
        signature: digests.signature,
        public_key,
    })
}
