//! # Golden Vector Tests
//!
//! The streamed digests must equal the digests of the complete canonical CBOR
//! byte strings, as produced by an independent minimal CBOR encoder in Python
//! and hashed with `hashlib.blake2b(digest_size=32)` and `hashlib.sha256`.
//!
//! Each vector is checked twice: against the hard-coded digest, and against a
//! one-shot hash of the hard-coded byte string, so a failure points at either
//! the encoding or the hashing.

use cvreg_auxdata::{AuxDataHashBuilder, RegistrationDigests};
use cvreg_core::{hex, ContentDigest, DigestAlgorithm, RegistrationFormat};
use cvreg_crypto::digest;

const VOTE_KEY: &str = "3b40265111d8bb3c3c608d95b3a0bf83461ace32d79336579a1939b3aad1c0b7";
const VOTE_KEY_2: &str = "1af8fa0b754ff99253d983894e63a2b09cbb56c833ba18c3384210163f63dcfc";
const STAKING_KEY: &str = "bc65be1b0b9d7531778a1317c2aa6de936963c3f9ac7d5ee9e9eda25e0c97c5e";
const ADDRESS: &str = "0180f9e2c88e6c817008f3a812ed889b4a4da8e0bd103f86e7335422aa122a2ced0d1c1cef26bd00d8a4bd4aab6b89fd3bda1ef6fdcb6a4e4b";

fn signature() -> Vec<u8> {
    (0u8..64).collect()
}

fn bytes(s: &str) -> Vec<u8> {
    hex::decode(s).expect("test vector hex")
}

// ---------------------------------------------------------------------------
// Vector 1: CIP-15, single vote key, nonce 1234
// ---------------------------------------------------------------------------

const CIP15_PAYLOAD_CBOR: &str = "a119ef64a40158203b40265111d8bb3c3c608d95b3a0bf83461ace32d79336579a1939b3aad1c0b7025820bc65be1b0b9d7531778a1317c2aa6de936963c3f9ac7d5ee9e9eda25e0c97c5e0358390180f9e2c88e6c817008f3a812ed889b4a4da8e0bd103f86e7335422aa122a2ced0d1c1cef26bd00d8a4bd4aab6b89fd3bda1ef6fdcb6a4e4b041904d2";
const CIP15_AUX_DATA_CBOR: &str = "82a219ef64a40158203b40265111d8bb3c3c608d95b3a0bf83461ace32d79336579a1939b3aad1c0b7025820bc65be1b0b9d7531778a1317c2aa6de936963c3f9ac7d5ee9e9eda25e0c97c5e0358390180f9e2c88e6c817008f3a812ed889b4a4da8e0bd103f86e7335422aa122a2ced0d1c1cef26bd00d8a4bd4aab6b89fd3bda1ef6fdcb6a4e4b041904d219ef65a1015840000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f80";

fn hash_cip15(algorithm: DigestAlgorithm) -> (ContentDigest, ContentDigest) {
    let mut b = AuxDataHashBuilder::with_algorithm(algorithm);
    b.enter_registration(RegistrationFormat::Cip15).unwrap();
    b.enter_payload().unwrap();
    b.add_vote_key(&bytes(VOTE_KEY)).unwrap();
    b.add_staking_key(&bytes(STAKING_KEY)).unwrap();
    b.add_payment_address(&bytes(ADDRESS)).unwrap();
    b.add_nonce(1234).unwrap();
    let payload = b.finalize_payload().unwrap();
    b.add_signature(&signature()).unwrap();
    b.add_auxiliary_scripts().unwrap();
    (payload, b.finalize().unwrap())
}

#[test]
fn test_cip15_blake2b256_vector() {
    let (payload, aux) = hash_cip15(DigestAlgorithm::Blake2b256);
    assert_eq!(
        payload.to_hex(),
        "591f099cb0029ce8070227877a0ed3ad1a63e1a9ebf59355b4afd28b641cccf4"
    );
    assert_eq!(
        aux.to_hex(),
        "d9f9c68371d41a6bbd495e661173818c00180853083dd4f760dc31a51582c9c2"
    );
    assert_eq!(payload, digest(DigestAlgorithm::Blake2b256, &bytes(CIP15_PAYLOAD_CBOR)));
    assert_eq!(aux, digest(DigestAlgorithm::Blake2b256, &bytes(CIP15_AUX_DATA_CBOR)));
}

#[test]
fn test_cip15_sha256_vector() {
    let (payload, aux) = hash_cip15(DigestAlgorithm::Sha256);
    assert_eq!(
        payload.to_hex(),
        "77e7489445e9faf8b04b3ed60f252a5f46adee582dbe6cbb2d29b04005d6226e"
    );
    assert_eq!(
        aux.to_hex(),
        "9256949bbd04b2fb85b1418b16f2c17e6be51ed4c9acc5a14914233a2be7a1e0"
    );
    assert_eq!(aux, digest(DigestAlgorithm::Sha256, &bytes(CIP15_AUX_DATA_CBOR)));
}

// ---------------------------------------------------------------------------
// Vector 2: CIP-36, two delegations, 4-byte nonce, voting purpose 0
// ---------------------------------------------------------------------------

const CIP36_PAYLOAD_CBOR: &str = "a119ef64a501828258203b40265111d8bb3c3c608d95b3a0bf83461ace32d79336579a1939b3aad1c0b7018258201af8fa0b754ff99253d983894e63a2b09cbb56c833ba18c3384210163f63dcfc03025820bc65be1b0b9d7531778a1317c2aa6de936963c3f9ac7d5ee9e9eda25e0c97c5e0358390180f9e2c88e6c817008f3a812ed889b4a4da8e0bd103f86e7335422aa122a2ced0d1c1cef26bd00d8a4bd4aab6b89fd3bda1ef6fdcb6a4e4b041a017d78400500";
const CIP36_AUX_DATA_CBOR: &str = "82a219ef64a501828258203b40265111d8bb3c3c608d95b3a0bf83461ace32d79336579a1939b3aad1c0b7018258201af8fa0b754ff99253d983894e63a2b09cbb56c833ba18c3384210163f63dcfc03025820bc65be1b0b9d7531778a1317c2aa6de936963c3f9ac7d5ee9e9eda25e0c97c5e0358390180f9e2c88e6c817008f3a812ed889b4a4da8e0bd103f86e7335422aa122a2ced0d1c1cef26bd00d8a4bd4aab6b89fd3bda1ef6fdcb6a4e4b041a017d7840050019ef65a1015840000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f80";

fn hash_cip36(algorithm: DigestAlgorithm) -> (ContentDigest, ContentDigest) {
    let mut b = AuxDataHashBuilder::with_algorithm(algorithm);
    b.enter_registration(RegistrationFormat::Cip36).unwrap();
    b.enter_payload().unwrap();
    b.enter_delegations(2).unwrap();
    b.add_delegation(&bytes(VOTE_KEY), 1).unwrap();
    b.add_delegation(&bytes(VOTE_KEY_2), 3).unwrap();
    b.add_staking_key(&bytes(STAKING_KEY)).unwrap();
    b.add_payment_address(&bytes(ADDRESS)).unwrap();
    b.add_nonce(25_000_000).unwrap();
    b.add_voting_purpose(0).unwrap();
    let payload = b.finalize_payload().unwrap();
    b.add_signature(&signature()).unwrap();
    b.add_auxiliary_scripts().unwrap();
    (payload, b.finalize().unwrap())
}

#[test]
fn test_cip36_blake2b256_vector() {
    let (payload, aux) = hash_cip36(DigestAlgorithm::Blake2b256);
    assert_eq!(
        payload.to_hex(),
        "22136cb615a2c65c80b1202632c9977b176b7dd5c1e68817a3fd89504d09b678"
    );
    assert_eq!(
        aux.to_hex(),
        "18b14286a5db21cc2636289fa79fc7edb09bf7cc86b1d33bfd23f82ea3c4beac"
    );
    assert_eq!(payload, digest(DigestAlgorithm::Blake2b256, &bytes(CIP36_PAYLOAD_CBOR)));
    assert_eq!(aux, digest(DigestAlgorithm::Blake2b256, &bytes(CIP36_AUX_DATA_CBOR)));
}

#[test]
fn test_cip36_sha256_vector() {
    let (payload, aux) = hash_cip36(DigestAlgorithm::Sha256);
    assert_eq!(
        payload.to_hex(),
        "d85852855d89dc8f03f918aa51fb77bb2c572e2e332c80e492d1697461dd7e9c"
    );
    assert_eq!(
        aux.to_hex(),
        "97073131c8cc169317200021277968cd6687bdc9497fc7e7f79e0ae80dd1525b"
    );
}

// ---------------------------------------------------------------------------
// Structural properties of the reference encodings
// ---------------------------------------------------------------------------

#[test]
fn test_inner_and_outer_share_payload_bytes() {
    // Outer = 82 a2 <payload entry> <signature entry> 80
    // Inner = a1 <payload entry>
    let inner = bytes(CIP15_PAYLOAD_CBOR);
    let outer = bytes(CIP15_AUX_DATA_CBOR);
    let payload_entry = &inner[1..];
    assert_eq!(inner[0], 0xa1);
    assert_eq!(&outer[..2], &[0x82u8, 0xa2]);
    assert_eq!(&outer[2..2 + payload_entry.len()], payload_entry);
    assert_eq!(outer.last(), Some(&0x80));
}

#[test]
fn test_format_switch_changes_only_map_size_and_purpose() {
    // With identical field values, CIP-36 differs from CIP-15 by the payload
    // map header (a5 vs a4) and the trailing voting purpose entry.
    let vote_key = bytes(VOTE_KEY);
    let run = |format: RegistrationFormat| {
        let mut b = AuxDataHashBuilder::new();
        b.enter_registration(format).unwrap();
        b.enter_payload().unwrap();
        b.add_vote_key(&vote_key).unwrap();
        b.add_staking_key(&bytes(STAKING_KEY)).unwrap();
        b.add_payment_address(&bytes(ADDRESS)).unwrap();
        b.add_nonce(1234).unwrap();
        if format == RegistrationFormat::Cip36 {
            b.add_voting_purpose(0).unwrap();
        }
        b.finalize_payload().unwrap()
    };

    let mut cip36_bytes = bytes(CIP15_PAYLOAD_CBOR);
    assert_eq!(cip36_bytes[4], 0xa4);
    cip36_bytes[4] = 0xa5;
    cip36_bytes.extend_from_slice(&[0x05, 0x00]);

    assert_eq!(
        run(RegistrationFormat::Cip15),
        digest(DigestAlgorithm::Blake2b256, &bytes(CIP15_PAYLOAD_CBOR))
    );
    assert_eq!(
        run(RegistrationFormat::Cip36),
        digest(DigestAlgorithm::Blake2b256, &cip36_bytes)
    );
}

#[test]
fn test_driver_reproduces_cip36_vector() {
    let json = format!(
        r#"{{
            "voting": {{"delegations": [
                {{"vote_key": "{VOTE_KEY}", "weight": 1}},
                {{"vote_key": "{VOTE_KEY_2}", "weight": 3}}
            ]}},
            "staking_key": "{STAKING_KEY}",
            "payment_address": "{ADDRESS}",
            "nonce": 25000000,
            "voting_purpose": 0
        }}"#
    );
    let reg: cvreg_auxdata::VoteRegistration = serde_json::from_str(&json).unwrap();
    let RegistrationDigests {
        payload_hash,
        aux_data_hash,
        ..
    } = cvreg_auxdata::hash_registration(&reg, DigestAlgorithm::Blake2b256, |_| Ok(signature()))
        .unwrap();
    assert_eq!(
        payload_hash.to_hex(),
        "22136cb615a2c65c80b1202632c9977b176b7dd5c1e68817a3fd89504d09b678"
    );
    assert_eq!(
        aux_data_hash.to_hex(),
        "18b14286a5db21cc2636289fa79fc7edb09bf7cc86b1d33bfd23f82ea3c4beac"
    );
}
