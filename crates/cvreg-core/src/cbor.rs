//! # Canonical CBOR Token Encoding
//!
//! Produces the header bytes of a single CBOR data item (RFC 8949 §3) for the
//! four major types the auxiliary data structure uses.
//!
//! ## Canonical Form
//!
//! The argument is always written in the shortest form that holds it
//! (RFC 8949 §4.2.1, "preferred serialization"):
//!
//! | value range              | encoded size |
//! |--------------------------|--------------|
//! | `0..=23`                 | 1 byte       |
//! | `24..=0xff`              | 2 bytes      |
//! | `0x100..=0xffff`         | 3 bytes      |
//! | `0x1_0000..=0xffff_ffff` | 5 bytes      |
//! | larger                   | 9 bytes      |
//!
//! Every logical value therefore has exactly one byte representation, which
//! is what lets a digest commit to data rather than to one particular
//! serializer's output.

/// Largest encoded token: one initial byte plus an 8-byte argument.
pub const MAX_TOKEN_SIZE: usize = 9;

/// CBOR major types used by the auxiliary data encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CborType {
    /// Major type 0: unsigned integer. The argument is the value itself.
    Unsigned,
    /// Major type 2: byte string header. The argument is the byte length.
    Bytes,
    /// Major type 4: array header. The argument is the element count.
    Array,
    /// Major type 5: map header. The argument is the entry count.
    Map,
}

impl CborType {
    /// The 3-bit major type number.
    pub fn major(&self) -> u8 {
        match self {
            Self::Unsigned => 0,
            Self::Bytes => 2,
            Self::Array => 4,
            Self::Map => 5,
        }
    }
}

impl std::fmt::Display for CborType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unsigned => "unsigned",
            Self::Bytes => "bytes",
            Self::Array => "array",
            Self::Map => "map",
        };
        f.write_str(s)
    }
}

/// A single encoded token held on the stack.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EncodedToken {
    buf: [u8; MAX_TOKEN_SIZE],
    len: u8,
}

impl EncodedToken {
    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Encoded length in bytes (1, 2, 3, 5 or 9).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; a token has at least its initial byte.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for EncodedToken {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for EncodedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EncodedToken({})", crate::hex::encode(self.as_bytes()))
    }
}

/// Encode a token header of the given type with the given argument.
///
/// For [`CborType::Bytes`] only the header is produced; the caller appends
/// the raw bytes separately.
pub fn encode_token(ty: CborType, value: u64) -> EncodedToken {
    let mut buf = [0u8; MAX_TOKEN_SIZE];
    let major = ty.major() << 5;

    let len = if value < 24 {
        buf[0] = major | value as u8;
        1
    } else if value <= u64::from(u8::MAX) {
        buf[0] = major | 24;
        buf[1] = value as u8;
        2
    } else if value <= u64::from(u16::MAX) {
        buf[0] = major | 25;
        buf[1..3].copy_from_slice(&(value as u16).to_be_bytes());
        3
    } else if value <= u64::from(u32::MAX) {
        buf[0] = major | 26;
        buf[1..5].copy_from_slice(&(value as u32).to_be_bytes());
        5
    } else {
        buf[0] = major | 27;
        buf[1..9].copy_from_slice(&value.to_be_bytes());
        9
    };

    EncodedToken { buf, len }
}
