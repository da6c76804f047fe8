//! # Dual-Sink Append
//!
//! Most of the registration payload is hashed twice: once as part of the
//! complete auxiliary data, once on its own for the payload signature. The
//! two byte streams differ only in framing, so every emission names the set of
//! sinks it belongs to and [`DualSink`] forwards the same bytes to each.
//!
//! Bytes reaching the auxiliary-data sink are traced at `TRACE` level, which
//! is enough to reconstruct the hashed byte string from logs.

use std::ops::BitOr;

use cvreg_core::error::ContractViolation;
use cvreg_core::metadata::BUFFER_SIZE_PARANOIA;
use cvreg_core::{encode_token, hex, CborType};
use cvreg_crypto::HashContext;

/// A set of hash sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SinkSet(u8);

impl SinkSet {
    /// No sink.
    pub const NONE: Self = Self(0);
    /// The complete auxiliary data digest.
    pub const AUX_DATA: Self = Self(1 << 0);
    /// The standalone registration payload digest.
    pub const REGISTRATION_PAYLOAD: Self = Self(1 << 1);
    /// Both digests.
    pub const BOTH: Self = Self(Self::AUX_DATA.0 | Self::REGISTRATION_PAYLOAD.0);

    /// Whether every sink in `other` is in this set.
    pub fn contains(self, other: Self) -> bool {
        !other.is_empty() && self.0 & other.0 == other.0
    }

    /// Whether the set has no sinks.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for SinkSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Reject buffers at or above [`BUFFER_SIZE_PARANOIA`].
pub fn check_buffer_size(size: usize) -> Result<(), ContractViolation> {
    if size >= BUFFER_SIZE_PARANOIA {
        return Err(ContractViolation::BufferTooLarge {
            size,
            limit: BUFFER_SIZE_PARANOIA,
        });
    }
    Ok(())
}

/// Forwards encoded tokens and raw bytes into the selected hash contexts.
#[derive(Debug)]
pub struct DualSink<'a> {
    aux_data: &'a mut HashContext,
    registration_payload: &'a mut HashContext,
}

impl<'a> DualSink<'a> {
    /// Route into the given auxiliary-data and registration-payload contexts.
    pub fn new(
        aux_data: &'a mut HashContext,
        registration_payload: &'a mut HashContext,
    ) -> Self {
        Self {
            aux_data,
            registration_payload,
        }
    }

    /// Append one canonical token.
    pub fn append_token(&mut self, sinks: SinkSet, ty: CborType, value: u64) {
        let token = encode_token(ty, value);
        self.forward(sinks, token.as_bytes());
    }

    /// Append raw bytes.
    pub fn append_bytes(&mut self, sinks: SinkSet, data: &[u8]) -> Result<(), ContractViolation> {
        check_buffer_size(data.len())?;
        self.forward(sinks, data);
        Ok(())
    }

    /// Append a byte string: the length header followed by the bytes.
    pub fn append_byte_string(
        &mut self,
        sinks: SinkSet,
        data: &[u8],
    ) -> Result<(), ContractViolation> {
        check_buffer_size(data.len())?;
        self.append_token(sinks, CborType::Bytes, data.len() as u64);
        self.forward(sinks, data);
        Ok(())
    }

    fn forward(&mut self, sinks: SinkSet, data: &[u8]) {
        if sinks.contains(SinkSet::AUX_DATA) {
            tracing::trace!(bytes = %hex::encode(data), "aux data append");
            self.aux_data.append(data);
        }
        if sinks.contains(SinkSet::REGISTRATION_PAYLOAD) {
            self.registration_payload.append(data);
        }
    }
}
