//! # Registration Metadata Registry
//!
//! The numeric labels and map keys of the CIP-15 / CIP-36 voter registration
//! metadata, and the size constants the encoding relies on. These values are
//! part of the interoperability contract: any independent verifier re-encodes
//! the registration with exactly these keys.
//!
//! ```text
//! [                                   ; auxiliary data, array(2)
//!   {                                 ; metadata, map(2)
//!     61284: {                        ; registration payload, map(4 | 5)
//!       1: vote_key | [[key, weight], ...],
//!       2: staking_key,
//!       3: payment_address,
//!       4: nonce,
//!       5: voting_purpose,            ; CIP-36 only
//!     },
//!     61285: { 1: signature },        ; registration signature
//!   },
//!   [],                               ; auxiliary scripts
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// Transaction metadata label of the registration payload.
pub const METADATA_KEY_REGISTRATION_PAYLOAD: u64 = 61284;

/// Transaction metadata label of the registration signature.
pub const METADATA_KEY_REGISTRATION_SIGNATURE: u64 = 61285;

/// Key of the signature value inside the signature map.
pub const REGISTRATION_SIGNATURE_KEY: u64 = 1;

/// Size of Ed25519 vote, delegation and staking public keys.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of the Ed25519 registration signature.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Upper bound on any buffer fed to a hash context.
pub const BUFFER_SIZE_PARANOIA: usize = 1024;

/// Keys of the registration payload map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKey {
    /// Single vote key (CIP-15) or delegation list (CIP-36) share this slot.
    VoteKey,
    /// Staking public key.
    StakingKey,
    /// Address receiving voting rewards.
    PaymentAddress,
    /// Monotonic nonce, usually the current slot number.
    Nonce,
    /// Voting purpose, CIP-36 only.
    VotingPurpose,
}

impl PayloadKey {
    /// The integer map key written into the encoding.
    pub fn value(&self) -> u64 {
        match self {
            Self::VoteKey => 1,
            Self::StakingKey => 2,
            Self::PaymentAddress => 3,
            Self::Nonce => 4,
            Self::VotingPurpose => 5,
        }
    }
}

impl std::fmt::Display for PayloadKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::VoteKey => "vote_key",
            Self::StakingKey => "staking_key",
            Self::PaymentAddress => "payment_address",
            Self::Nonce => "nonce",
            Self::VotingPurpose => "voting_purpose",
        };
        f.write_str(s)
    }
}

/// Shape of the registration payload map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationFormat {
    /// Catalyst registration: vote key, staking key, address, nonce.
    Cip15,
    /// Multi-delegation registration: adds the voting purpose field.
    Cip36,
}

impl RegistrationFormat {
    /// Number of entries in the payload map.
    pub fn payload_map_size(&self) -> u64 {
        match self {
            Self::Cip15 => 4,
            Self::Cip36 => 5,
        }
    }

    /// Whether the payload carries a voting purpose entry.
    pub fn has_voting_purpose(&self) -> bool {
        matches!(self, Self::Cip36)
    }
}

impl std::fmt::Display for RegistrationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cip15 => f.write_str("CIP-15"),
            Self::Cip36 => f.write_str("CIP-36"),
        }
    }
}
