//! Property-based tests for container and payload encoding/decoding
//!
//! These tests verify that both codecs are correct for ALL valid inputs,
//! not just specific examples. Uses proptest to generate arbitrary
//! containers and payloads and verify round-trip properties.

use lockbox_format::{BLOCK_SIZE, Container, ContainerHeader, FilePayload, IV_SIZE, TAG_SIZE};
use proptest::prelude::*;

/// Strategy for generating arbitrary container headers
fn arbitrary_header() -> impl Strategy<Value = ContainerHeader> {
    (any::<i64>(), any::<[u8; IV_SIZE]>(), any::<[u8; TAG_SIZE]>()).prop_map(
        |(expiry, iv, tag)| {
            let mut header = ContainerHeader::new(expiry, iv);
            header.set_tag(tag);
            header
        },
    )
}

/// Strategy for generating block-aligned ciphertexts (1..=64 blocks)
fn arbitrary_ciphertext() -> impl Strategy<Value = Vec<u8>> {
    (1usize..=64, prop::collection::vec(any::<u8>(), 64 * BLOCK_SIZE))
        .prop_map(|(blocks, bytes)| bytes[..blocks * BLOCK_SIZE].to_vec())
}

/// Strategy for generating arbitrary containers
fn arbitrary_container() -> impl Strategy<Value = Container> {
    (arbitrary_header(), arbitrary_ciphertext())
        .prop_map(|(header, ciphertext)| Container::new(header, ciphertext))
}

/// Strategy for generating arbitrary payloads
fn arbitrary_payload() -> impl Strategy<Value = FilePayload> {
    (".{0,40}", "[a-z0-9.]{0,10}", prop::collection::vec(any::<u8>(), 0..1024))
        .prop_map(|(name, extension, contents)| FilePayload::new(name, extension, contents))
}

#[test]
fn prop_container_encode_decode_roundtrip() {
    proptest!(|(container in arbitrary_container())| {
        let bytes = container.to_bytes().expect("encode should succeed");
        let decoded = Container::decode(&bytes).expect("decode should succeed");

        // PROPERTY: Round-trip must be identity
        prop_assert_eq!(decoded.header, container.header, "Header mismatch after round-trip");
        prop_assert_eq!(decoded.ciphertext, container.ciphertext, "Ciphertext mismatch");
    });
}

#[test]
fn prop_container_encoded_size_correct() {
    proptest!(|(container in arbitrary_container())| {
        let bytes = container.to_bytes().expect("encode should succeed");

        // PROPERTY: Encoded size must equal header size + ciphertext size
        prop_assert_eq!(bytes.len(), ContainerHeader::SIZE + container.ciphertext.len());
    });
}

#[test]
fn prop_container_decode_never_panics_on_arbitrary_bytes() {
    proptest!(|(bytes in prop::collection::vec(any::<u8>(), 0..512))| {
        // PROPERTY: Hostile input may be rejected but must never panic
        let _ = Container::decode(&bytes);
    });
}

#[test]
fn prop_truncating_a_container_breaks_decoding() {
    proptest!(|(container in arbitrary_container(), cut_fraction in 0.0f64..1.0)| {
        let bytes = container.to_bytes().expect("encode should succeed");
        let cut = (bytes.len() as f64 * cut_fraction) as usize;
        prop_assume!(cut < bytes.len());

        // PROPERTY: A truncated container never decodes to the original
        match Container::decode(&bytes[..cut]) {
            Ok(decoded) => prop_assert_ne!(decoded, container),
            Err(_) => {},
        }
    });
}

#[test]
fn prop_payload_encode_decode_roundtrip() {
    proptest!(|(payload in arbitrary_payload())| {
        let bytes = payload.encode().expect("encode should succeed");
        let decoded = FilePayload::decode(&bytes).expect("decode should succeed");

        // PROPERTY: Round-trip must be identity for any name/extension/contents
        prop_assert_eq!(decoded, payload);
    });
}

#[test]
fn prop_payload_encoding_is_injective() {
    proptest!(|(a in arbitrary_payload(), b in arbitrary_payload())| {
        prop_assume!(a != b);

        let bytes_a = a.encode().expect("encode should succeed");
        let bytes_b = b.encode().expect("encode should succeed");

        // PROPERTY: Distinct payloads never share an encoding
        prop_assert_ne!(bytes_a, bytes_b);
    });
}

#[test]
fn prop_payload_decode_never_panics_on_arbitrary_bytes() {
    proptest!(|(bytes in prop::collection::vec(any::<u8>(), 0..256))| {
        // PROPERTY: Arbitrary decrypted bytes may be rejected but must never panic
        let _ = FilePayload::decode(&bytes);
    });
}
