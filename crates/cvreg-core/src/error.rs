//! # Error Types — Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`.
//!
//! ## Design
//!
//! - [`ContractViolation`] is an integration bug in the caller: wrong call
//!   order, wrong buffer size, delegation count mismatch. It is never a user
//!   input error and the surrounding operation must be abandoned.
//! - [`CryptoError`] covers key parsing and signature verification.
//! - [`HexError`] covers malformed hex input at the serialization boundary.

use thiserror::Error;

use crate::metadata::RegistrationFormat;

/// Top-level error type for the workspace.
#[derive(Error, Debug)]
pub enum CvregError {
    /// The builder was driven outside its grammar.
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    /// Cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Hex decoding failed.
    #[error("hex error: {0}")]
    Hex(#[from] HexError),
}

/// A call sequence that does not match the canonical encoding shape.
///
/// Every variant is fatal for the builder that reported it: the builder is
/// poisoned and will refuse all further calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// The operation is not valid in the builder's current state.
    #[error("{operation} is not allowed in state {state}")]
    UnexpectedState {
        /// The rejected operation.
        operation: &'static str,
        /// Name of the state the builder was in.
        state: String,
    },

    /// A fixed-size field had the wrong length.
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Field name.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// A variable-size field was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Field name.
        field: &'static str,
    },

    /// A buffer exceeded the hashing sanity ceiling.
    #[error("buffer of {size} bytes exceeds the limit of {limit}")]
    BufferTooLarge {
        /// Supplied size.
        size: usize,
        /// Exclusive upper bound.
        limit: usize,
    },

    /// The delegation list was left before all announced entries were added.
    #[error("{remaining} delegations announced but not added")]
    DelegationsRemaining {
        /// Entries still owed.
        remaining: u64,
    },

    /// More delegations were added than announced.
    #[error("all announced delegations have already been added")]
    DelegationsExhausted,

    /// The operation does not belong to the chosen registration format.
    #[error("{operation} is not valid for {format} registrations")]
    FormatMismatch {
        /// The rejected operation.
        operation: &'static str,
        /// Format fixed at `enter_registration`.
        format: RegistrationFormat,
    },

    /// A field the chosen format requires was skipped.
    #[error("{field} is required before {operation}")]
    MissingField {
        /// The rejected operation.
        operation: &'static str,
        /// The skipped field.
        field: &'static str,
    },

    /// The registration payload digest was already taken.
    #[error("registration payload digest already finalized")]
    PayloadAlreadyFinalized,

    /// An earlier violation poisoned the builder.
    #[error("{operation} called on a builder poisoned by an earlier violation")]
    Poisoned {
        /// The rejected operation.
        operation: &'static str,
    },
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),
}

/// Error while decoding hex input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    /// Hex strings encode whole bytes.
    #[error("hex string must have even length, got {0}")]
    OddLength(usize),

    /// A character pair is not valid hex.
    #[error("invalid hex at position {position}")]
    InvalidDigit {
        /// Byte offset of the bad pair.
        position: usize,
    },

    /// Decoded to the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Decoded length.
        actual: usize,
    },
}
