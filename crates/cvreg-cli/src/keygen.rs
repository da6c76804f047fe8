//! # Keygen Subcommand
//!
//! Derives the Ed25519 public key for a staking key seed, for filling the
//! `staking_key` field of a registration file.

use clap::Args;
use cvreg_crypto::Ed25519PublicKey;
use serde::Serialize;

use crate::keypair_from_seed;

/// Arguments for the keygen subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Hex-encoded 32-byte Ed25519 seed.
    #[arg(long)]
    pub seed: String,
}

/// Output of the keygen subcommand.
#[derive(Debug, Serialize)]
pub struct KeygenReport {
    /// Ed25519 public key derived from the seed.
    pub public_key: Ed25519PublicKey,
}

/// Derive the public key for `args.seed`.
pub fn run(args: &KeygenArgs) -> anyhow::Result<KeygenReport> {
    let keypair = keypair_from_seed(&args.seed)?;
    Ok(KeygenReport {
        public_key: keypair.public_key(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc8032_seed() {
        let args = KeygenArgs {
            seed: "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60".into(),
        };
        let report = run(&args).unwrap();
        assert_eq!(
            report.public_key.to_hex(),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }

    #[test]
    fn test_short_seed_rejected() {
        let args = KeygenArgs { seed: "abcd".into() };
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("32 hex-encoded bytes"));
    }

    #[test]
    fn test_signed_digits_in_seed_rejected() {
        let args = KeygenArgs {
            seed: "+0".repeat(32),
        };
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("invalid hex at position 0"));
    }
}
