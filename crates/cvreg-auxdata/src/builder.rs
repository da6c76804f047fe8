//! # Auxiliary-Data Hash Builder
//!
//! Streams the canonical CBOR encoding of a voter-registration auxiliary data
//! structure into two digests without ever holding the encoded bytes.
//!
//! ## Grammar
//!
//! ```text
//! new ─▶ INIT ─enter_registration─▶ REGISTRATION_INIT ─enter_payload─▶ PAYLOAD_INIT
//!
//! PAYLOAD_INIT ─add_vote_key──────▶ VOTE_KEY ───────────────┐
//! PAYLOAD_INIT ─enter_delegations─▶ DELEGATIONS(n) ◀─┐      │
//!                                     │  add_delegation ─┘  │
//!                                     └── (n == 0) ─────────┤
//!                                                           ▼
//!   STAKING_KEY ─▶ PAYMENT_ADDRESS ─▶ NONCE ─(CIP-36)─▶ VOTING_PURPOSE
//!                                       │                   │
//!                                       └──(CIP-15)─┬───────┘
//!                                                   ▼
//!                               finalize_payload (at most once)
//!                                                   │
//!                          SIGNATURE ◀─add_signature┘
//!                              │
//!                   AUXILIARY_SCRIPTS ─finalize─▶ FINISHED
//! ```
//!
//! ## Framing
//!
//! The auxiliary-data digest covers `[{61284: payload, 61285: {1: sig}}, []]`.
//! The registration-payload digest covers `{61284: payload}`. The payload map
//! is emitted once into both sinks; only the enclosing map header differs.
//!
//! ## Security Invariant
//!
//! Any call outside the grammar returns a [`ContractViolation`] and poisons the
//! builder. A poisoned builder refuses every later call, so a digest can never
//! be produced from a malformed sequence. Checks run before the offending
//! call emits anything.

use cvreg_core::error::ContractViolation;
use cvreg_core::metadata::{
    ED25519_SIGNATURE_LENGTH, METADATA_KEY_REGISTRATION_PAYLOAD,
    METADATA_KEY_REGISTRATION_SIGNATURE, PUBLIC_KEY_SIZE, REGISTRATION_SIGNATURE_KEY,
};
use cvreg_core::{CborType, ContentDigest, DigestAlgorithm, PayloadKey, RegistrationFormat};
use cvreg_crypto::HashContext;

use crate::sink::{check_buffer_size, DualSink, SinkSet};

/// Position of the builder in the encoding grammar.
///
/// Variants carry only the data that is meaningful at that position: the
/// registration format up to the nonce, the delegation countdown only inside
/// the delegation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// Outer array opened.
    Init,
    /// Metadata maps opened; format fixed.
    RegistrationInit { format: RegistrationFormat },
    /// Payload map opened.
    PayloadInit { format: RegistrationFormat },
    /// Single vote key written.
    VoteKey { format: RegistrationFormat },
    /// Inside the delegation list with `remaining` entries still owed.
    Delegations {
        format: RegistrationFormat,
        remaining: u64,
    },
    /// Staking key written.
    StakingKey { format: RegistrationFormat },
    /// Payment address written.
    PaymentAddress { format: RegistrationFormat },
    /// Nonce written.
    Nonce { format: RegistrationFormat },
    /// Voting purpose written (CIP-36 payload complete).
    VotingPurpose,
    /// Registration signature written.
    Signature,
    /// Auxiliary scripts written.
    AuxiliaryScripts,
    /// Auxiliary data digest taken (terminal).
    Finished,
    /// A contract violation occurred (terminal).
    Poisoned,
}

impl BuilderState {
    /// Whether no further calls are accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Poisoned)
    }
}

impl std::fmt::Display for BuilderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Init => "INIT",
            Self::RegistrationInit { .. } => "REGISTRATION_INIT",
            Self::PayloadInit { .. } => "PAYLOAD_INIT",
            Self::VoteKey { .. } => "VOTE_KEY",
            Self::Delegations { .. } => "DELEGATIONS",
            Self::StakingKey { .. } => "STAKING_KEY",
            Self::PaymentAddress { .. } => "PAYMENT_ADDRESS",
            Self::Nonce { .. } => "NONCE",
            Self::VotingPurpose => "VOTING_PURPOSE",
            Self::Signature => "SIGNATURE",
            Self::AuxiliaryScripts => "AUXILIARY_SCRIPTS",
            Self::Finished => "FINISHED",
            Self::Poisoned => "POISONED",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
struct RegistrationContext {
    payload_hash: HashContext,
    payload_finalized: bool,
}

/// Streaming builder for the auxiliary-data and registration-payload digests.
///
/// One builder serves one signing operation. It is not meant to be shared:
/// every mutation takes `&mut self`.
#[derive(Debug)]
pub struct AuxDataHashBuilder {
    state: BuilderState,
    aux_data_hash: HashContext,
    registration: RegistrationContext,
}

impl Default for AuxDataHashBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuxDataHashBuilder {
    /// Start a builder hashing with Blake2b-256.
    pub fn new() -> Self {
        Self::with_algorithm(DigestAlgorithm::Blake2b256)
    }

    /// Start a builder hashing with the given algorithm.
    ///
    /// Opens the two-element auxiliary data array.
    pub fn with_algorithm(algorithm: DigestAlgorithm) -> Self {
        tracing::debug!(%algorithm, "serializing tx auxiliary data");
        let mut builder = Self {
            state: BuilderState::Init,
            aux_data_hash: HashContext::new(algorithm),
            registration: RegistrationContext {
                payload_hash: HashContext::new(algorithm),
                payload_finalized: false,
            },
        };
        builder.sink().append_token(SinkSet::AUX_DATA, CborType::Array, 2);
        builder
    }

    /// Current grammar position.
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Hash algorithm of both digests.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.aux_data_hash.algorithm()
    }

    /// Open the metadata maps and fix the payload format.
    pub fn enter_registration(
        &mut self,
        format: RegistrationFormat,
    ) -> Result<(), ContractViolation> {
        const OP: &str = "enter_registration";
        self.guarded(OP, |b| {
            if b.state != BuilderState::Init {
                return Err(b.unexpected(OP));
            }
            let mut sink = b.sink();
            // completed auxiliary data: {61284: ..., 61285: ...}
            sink.append_token(SinkSet::AUX_DATA, CborType::Map, 2);
            // signed payload: {61284: ...}
            sink.append_token(SinkSet::REGISTRATION_PAYLOAD, CborType::Map, 1);
            b.transition(BuilderState::RegistrationInit { format });
            Ok(())
        })
    }

    /// Write the payload label and open the payload map.
    pub fn enter_payload(&mut self) -> Result<(), ContractViolation> {
        const OP: &str = "enter_payload";
        self.guarded(OP, |b| {
            let BuilderState::RegistrationInit { format } = b.state else {
                return Err(b.unexpected(OP));
            };
            let mut sink = b.sink();
            sink.append_token(
                SinkSet::BOTH,
                CborType::Unsigned,
                METADATA_KEY_REGISTRATION_PAYLOAD,
            );
            sink.append_token(SinkSet::BOTH, CborType::Map, format.payload_map_size());
            b.transition(BuilderState::PayloadInit { format });
            Ok(())
        })
    }

    /// Write a single vote key.
    pub fn add_vote_key(&mut self, vote_key: &[u8]) -> Result<(), ContractViolation> {
        const OP: &str = "add_vote_key";
        self.guarded(OP, |b| {
            check_buffer_size(vote_key.len())?;
            let BuilderState::PayloadInit { format } = b.state else {
                return Err(b.unexpected(OP));
            };
            check_length("vote_key", vote_key, PUBLIC_KEY_SIZE)?;
            b.append_field(PayloadKey::VoteKey);
            b.sink().append_byte_string(SinkSet::BOTH, vote_key)?;
            b.transition(BuilderState::VoteKey { format });
            Ok(())
        })
    }

    /// Open a delegation list of exactly `count` entries.
    ///
    /// The list shares the vote key slot of the payload map.
    pub fn enter_delegations(&mut self, count: u64) -> Result<(), ContractViolation> {
        const OP: &str = "enter_delegations";
        self.guarded(OP, |b| {
            let BuilderState::PayloadInit { format } = b.state else {
                return Err(b.unexpected(OP));
            };
            b.append_field(PayloadKey::VoteKey);
            b.sink().append_token(SinkSet::BOTH, CborType::Array, count);
            b.transition(BuilderState::Delegations {
                format,
                remaining: count,
            });
            Ok(())
        })
    }

    /// Write one `[vote_key, weight]` delegation.
    pub fn add_delegation(&mut self, vote_key: &[u8], weight: u32) -> Result<(), ContractViolation> {
        const OP: &str = "add_delegation";
        self.guarded(OP, |b| {
            check_buffer_size(vote_key.len())?;
            let BuilderState::Delegations { format, remaining } = b.state else {
                return Err(b.unexpected(OP));
            };
            if remaining == 0 {
                return Err(ContractViolation::DelegationsExhausted);
            }
            check_length("delegation vote_key", vote_key, PUBLIC_KEY_SIZE)?;

            let mut sink = b.sink();
            sink.append_token(SinkSet::BOTH, CborType::Array, 2);
            sink.append_byte_string(SinkSet::BOTH, vote_key)?;
            sink.append_token(SinkSet::BOTH, CborType::Unsigned, u64::from(weight));

            b.state = BuilderState::Delegations {
                format,
                remaining: remaining - 1,
            };
            tracing::trace!(remaining = remaining - 1, "delegation added");
            Ok(())
        })
    }

    /// Write the staking key. Closes the delegation list if one is open.
    pub fn add_staking_key(&mut self, staking_key: &[u8]) -> Result<(), ContractViolation> {
        const OP: &str = "add_staking_key";
        self.guarded(OP, |b| {
            check_buffer_size(staking_key.len())?;
            let format = match b.state {
                BuilderState::VoteKey { format } => format,
                BuilderState::Delegations {
                    format,
                    remaining: 0,
                } => format,
                BuilderState::Delegations { remaining, .. } => {
                    return Err(ContractViolation::DelegationsRemaining { remaining });
                }
                _ => return Err(b.unexpected(OP)),
            };
            check_length("staking_key", staking_key, PUBLIC_KEY_SIZE)?;
            b.append_field(PayloadKey::StakingKey);
            b.sink().append_byte_string(SinkSet::BOTH, staking_key)?;
            b.transition(BuilderState::StakingKey { format });
            Ok(())
        })
    }

    /// Write the reward payment address. The address is opaque here; only
    /// its size is checked.
    pub fn add_payment_address(&mut self, address: &[u8]) -> Result<(), ContractViolation> {
        const OP: &str = "add_payment_address";
        self.guarded(OP, |b| {
            if address.is_empty() {
                return Err(ContractViolation::EmptyField {
                    field: "payment_address",
                });
            }
            check_buffer_size(address.len())?;
            let BuilderState::StakingKey { format } = b.state else {
                return Err(b.unexpected(OP));
            };
            b.append_field(PayloadKey::PaymentAddress);
            b.sink().append_byte_string(SinkSet::BOTH, address)?;
            b.transition(BuilderState::PaymentAddress { format });
            Ok(())
        })
    }

    /// Write the nonce.
    pub fn add_nonce(&mut self, nonce: u64) -> Result<(), ContractViolation> {
        const OP: &str = "add_nonce";
        self.guarded(OP, |b| {
            let BuilderState::PaymentAddress { format } = b.state else {
                return Err(b.unexpected(OP));
            };
            b.append_field(PayloadKey::Nonce);
            b.sink().append_token(SinkSet::BOTH, CborType::Unsigned, nonce);
            b.transition(BuilderState::Nonce { format });
            Ok(())
        })
    }

    /// Write the voting purpose. CIP-36 only.
    pub fn add_voting_purpose(&mut self, voting_purpose: u64) -> Result<(), ContractViolation> {
        const OP: &str = "add_voting_purpose";
        self.guarded(OP, |b| {
            let BuilderState::Nonce { format } = b.state else {
                return Err(b.unexpected(OP));
            };
            if !format.has_voting_purpose() {
                return Err(ContractViolation::FormatMismatch {
                    operation: OP,
                    format,
                });
            }
            b.append_field(PayloadKey::VotingPurpose);
            b.sink()
                .append_token(SinkSet::BOTH, CborType::Unsigned, voting_purpose);
            b.transition(BuilderState::VotingPurpose);
            Ok(())
        })
    }

    /// Take the registration payload digest.
    ///
    /// Allowed once, after the last payload field and before the signature.
    /// The builder state is unchanged; the auxiliary data digest continues.
    pub fn finalize_payload(&mut self) -> Result<ContentDigest, ContractViolation> {
        const OP: &str = "finalize_payload";
        self.guarded(OP, |b| {
            b.require_complete_payload(OP)?;
            if b.registration.payload_finalized {
                return Err(ContractViolation::PayloadAlreadyFinalized);
            }
            b.registration.payload_finalized = true;
            let digest = b.registration.payload_hash.finalize();
            tracing::debug!(payload_hash = %digest, "registration payload hashed");
            Ok(digest)
        })
    }

    /// Write the registration signature map. Auxiliary data digest only.
    pub fn add_signature(&mut self, signature: &[u8]) -> Result<(), ContractViolation> {
        const OP: &str = "add_signature";
        self.guarded(OP, |b| {
            check_buffer_size(signature.len())?;
            b.require_complete_payload(OP)?;
            check_length("signature", signature, ED25519_SIGNATURE_LENGTH)?;

            let mut sink = b.sink();
            sink.append_token(
                SinkSet::AUX_DATA,
                CborType::Unsigned,
                METADATA_KEY_REGISTRATION_SIGNATURE,
            );
            sink.append_token(SinkSet::AUX_DATA, CborType::Map, 1);
            sink.append_token(
                SinkSet::AUX_DATA,
                CborType::Unsigned,
                REGISTRATION_SIGNATURE_KEY,
            );
            sink.append_byte_string(SinkSet::AUX_DATA, signature)?;
            b.transition(BuilderState::Signature);
            Ok(())
        })
    }

    /// Write the auxiliary scripts, always an empty array.
    pub fn add_auxiliary_scripts(&mut self) -> Result<(), ContractViolation> {
        const OP: &str = "add_auxiliary_scripts";
        self.guarded(OP, |b| {
            if b.state != BuilderState::Signature {
                return Err(b.unexpected(OP));
            }
            b.sink().append_token(SinkSet::AUX_DATA, CborType::Array, 0);
            b.transition(BuilderState::AuxiliaryScripts);
            Ok(())
        })
    }

    /// Take the auxiliary data digest. Terminal.
    pub fn finalize(&mut self) -> Result<ContentDigest, ContractViolation> {
        const OP: &str = "finalize";
        self.guarded(OP, |b| {
            if b.state != BuilderState::AuxiliaryScripts {
                return Err(b.unexpected(OP));
            }
            let digest = b.aux_data_hash.finalize();
            b.transition(BuilderState::Finished);
            tracing::debug!(aux_data_hash = %digest, "auxiliary data hashed");
            Ok(digest)
        })
    }

    // ─── Internals ──────────────────────────────────────────────────

    fn sink(&mut self) -> DualSink<'_> {
        DualSink::new(
            &mut self.aux_data_hash,
            &mut self.registration.payload_hash,
        )
    }

    /// Run one operation, poisoning the builder if it fails.
    fn guarded<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, ContractViolation>,
    ) -> Result<T, ContractViolation> {
        if self.state.is_terminal() {
            let violation = match self.state {
                BuilderState::Poisoned => ContractViolation::Poisoned { operation },
                _ => self.unexpected(operation),
            };
            tracing::error!(
                operation,
                state = %self.state,
                %violation,
                "aux data builder is closed"
            );
            self.state = BuilderState::Poisoned;
            return Err(violation);
        }
        let result = f(self);
        if let Err(violation) = &result {
            tracing::error!(
                operation,
                state = %self.state,
                %violation,
                "aux data contract violation"
            );
            self.state = BuilderState::Poisoned;
        }
        result
    }

    fn transition(&mut self, next: BuilderState) {
        tracing::debug!(from = %self.state, to = %next, "aux data builder transition");
        self.state = next;
    }

    fn unexpected(&self, operation: &'static str) -> ContractViolation {
        ContractViolation::UnexpectedState {
            operation,
            state: self.state.to_string(),
        }
    }

    fn append_field(&mut self, key: PayloadKey) {
        self.sink()
            .append_token(SinkSet::BOTH, CborType::Unsigned, key.value());
    }

    /// The payload map holds exactly as many entries as announced.
    fn require_complete_payload(&self, operation: &'static str) -> Result<(), ContractViolation> {
        match self.state {
            BuilderState::VotingPurpose => Ok(()),
            BuilderState::Nonce { format } if !format.has_voting_purpose() => Ok(()),
            BuilderState::Nonce { .. } => Err(ContractViolation::MissingField {
                operation,
                field: "voting_purpose",
            }),
            _ => Err(self.unexpected(operation)),
        }
    }
}

fn check_length(field: &'static str, data: &[u8], expected: usize) -> Result<(), ContractViolation> {
    if data.len() != expected {
        return Err(ContractViolation::InvalidLength {
            field,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn run(
        weights: &[u32],
        address: &[u8],
        nonce: u64,
        purpose: u64,
    ) -> (ContentDigest, ContentDigest) {
        let mut b = AuxDataHashBuilder::new();
        b.enter_registration(RegistrationFormat::Cip36).unwrap();
        b.enter_payload().unwrap();
        b.enter_delegations(weights.len() as u64).unwrap();
        for w in weights {
            b.add_delegation(&[0x5a; 32], *w).unwrap();
        }
        b.add_staking_key(&[0xa5; 32]).unwrap();
        b.add_payment_address(address).unwrap();
        b.add_nonce(nonce).unwrap();
        b.add_voting_purpose(purpose).unwrap();
        let payload = b.finalize_payload().unwrap();
        b.add_signature(&[0u8; 64]).unwrap();
        b.add_auxiliary_scripts().unwrap();
        (payload, b.finalize().unwrap())
    }

    proptest! {
        /// Same inputs, same digests; the two digests never coincide.
        #[test]
        fn digests_deterministic_and_distinct(
            weights in prop::collection::vec(any::<u32>(), 0..5),
            address in prop::collection::vec(any::<u8>(), 1..100),
            nonce in any::<u64>(),
            purpose in any::<u64>(),
        ) {
            let (p1, a1) = run(&weights, &address, nonce, purpose);
            let (p2, a2) = run(&weights, &address, nonce, purpose);
            prop_assert_eq!(p1, p2);
            prop_assert_eq!(a1, a2);
            prop_assert_ne!(p1.bytes, a1.bytes);
        }
    }
}
