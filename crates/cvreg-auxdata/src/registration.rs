//! # Registration Driver
//!
//! A complete voter registration as data, and the one call sequence that
//! feeds it through [`AuxDataHashBuilder`]. The payload digest is handed to an
//! external signer; the returned signature is folded into the auxiliary data.
//!
//! Byte fields are hex strings in JSON:
//!
//! ```json
//! {
//!   "voting": { "delegations": [ { "vote_key": "3b40…", "weight": 1 } ] },
//!   "staking_key": "bc65…",
//!   "payment_address": "0180…",
//!   "nonce": 25000000,
//!   "voting_purpose": 0
//! }
//! ```

use cvreg_core::error::{ContractViolation, CryptoError, CvregError};
use cvreg_core::{ContentDigest, DigestAlgorithm, HexBytes, RegistrationFormat};
use serde::{Deserialize, Serialize};

use crate::builder::AuxDataHashBuilder;

/// One weighted vote delegation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// Ed25519 vote public key of the delegate.
    pub vote_key: HexBytes,
    /// Relative voting weight.
    pub weight: u32,
}

/// What occupies the vote key slot of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voting {
    /// A single vote key receiving all voting power.
    Key(HexBytes),
    /// A list of weighted delegations.
    Delegations(Vec<Delegation>),
}

/// A complete voter registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRegistration {
    /// Payload format. Inferred from `voting_purpose` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RegistrationFormat>,
    /// Vote key or delegations.
    pub voting: Voting,
    /// Staking public key.
    pub staking_key: HexBytes,
    /// Reward address, raw bytes.
    pub payment_address: HexBytes,
    /// Registration nonce.
    pub nonce: u64,
    /// Voting purpose, CIP-36 only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting_purpose: Option<u64>,
}

/// Everything produced by hashing a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDigests {
    /// Digest of `{61284: payload}`, the message the signer signed.
    pub payload_hash: ContentDigest,
    /// Digest of the complete auxiliary data.
    pub aux_data_hash: ContentDigest,
    /// The registration signature embedded in the auxiliary data.
    pub signature: HexBytes,
}

impl VoteRegistration {
    /// The payload format, explicit or inferred.
    pub fn format(&self) -> RegistrationFormat {
        self.format.unwrap_or(if self.voting_purpose.is_some() {
            RegistrationFormat::Cip36
        } else {
            RegistrationFormat::Cip15
        })
    }

    /// Feed the registration payload into `builder` and take its digest.
    ///
    /// The builder must be fresh; on success it is ready for the signature.
    pub fn hash_payload(
        &self,
        builder: &mut AuxDataHashBuilder,
    ) -> Result<ContentDigest, ContractViolation> {
        builder.enter_registration(self.format())?;
        builder.enter_payload()?;
        match &self.voting {
            Voting::Key(key) => builder.add_vote_key(key.as_slice())?,
            Voting::Delegations(delegations) => {
                builder.enter_delegations(delegations.len() as u64)?;
                for d in delegations {
                    builder.add_delegation(d.vote_key.as_slice(), d.weight)?;
                }
            }
        }
        builder.add_staking_key(self.staking_key.as_slice())?;
        builder.add_payment_address(self.payment_address.as_slice())?;
        builder.add_nonce(self.nonce)?;
        if let Some(purpose) = self.voting_purpose {
            builder.add_voting_purpose(purpose)?;
        }
        builder.finalize_payload()
    }
}

/// Hash a registration end to end.
///
/// `sign` receives the payload digest and returns the raw signature bytes.
pub fn hash_registration<F>(
    registration: &VoteRegistration,
    algorithm: DigestAlgorithm,
    sign: F,
) -> Result<RegistrationDigests, CvregError>
where
    F: FnOnce(&ContentDigest) -> Result<Vec<u8>, CryptoError>,
{
    let mut builder = AuxDataHashBuilder::with_algorithm(algorithm);
    let payload_hash = registration.hash_payload(&mut builder)?;

    let signature = sign(&payload_hash)?;
    builder.add_signature(&signature)?;
    builder.add_auxiliary_scripts()?;
    let aux_data_hash = builder.finalize()?;

    Ok(RegistrationDigests {
        payload_hash,
        aux_data_hash,
        signature: signature.into(),
    })
}
