//! Container type combining header and ciphertext.
//!
//! A `Container` is the on-disk artifact: a 64-byte raw binary header
//! followed by the variable-length ciphertext. This is a pure data
//! holder; sealing and opening live in the protocol layer.

use bytes::BufMut;

use crate::{
    BLOCK_SIZE,
    errors::FormatError,
    header::ContainerHeader,
};

/// Complete lockbox container (persisted artifact).
///
/// Layout on disk:
/// `[ContainerHeader: 64 bytes, raw binary] + [ciphertext: variable]`
///
/// # Invariants
///
/// - Block Alignment: `ciphertext.len()` MUST be a positive multiple of
///   [`BLOCK_SIZE`] (PKCS#7 padding guarantees at least one block).
///   Enforced by [`Container::encode`] and verified by
///   [`Container::decode`].
/// - Size Limit: `ciphertext.len()` MUST NOT exceed
///   [`Container::MAX_CIPHERTEXT_SIZE`]. Violations are rejected during
///   encoding and decoding.
/// - Immutability: a container is created once by sealing and never
///   updated in place; a new expiry or password means a new container.
///
/// # Security
///
/// Provides structural validity only. A decoded container has a valid
/// header and a plausibly-shaped ciphertext; whether the tag verifies is
/// decided later, in the protocol layer, before the ciphertext or the
/// expiry is trusted for anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Container header (64 bytes)
    pub header: ContainerHeader,

    /// Encrypted payload (AES-256-CBC, PKCS#7-padded)
    pub ciphertext: Vec<u8>,
}

impl Container {
    /// Maximum ciphertext size (64 MiB). Sealing is single-shot and
    /// whole-file; this bounds memory for hostile inputs.
    pub const MAX_CIPHERTEXT_SIZE: usize = 64 * 1024 * 1024;

    /// Smallest valid container: header plus one cipher block.
    pub const MIN_SIZE: usize = ContainerHeader::SIZE + BLOCK_SIZE;

    /// Create a new container from its parts.
    #[must_use]
    pub fn new(header: ContainerHeader, ciphertext: impl Into<Vec<u8>>) -> Self {
        Self { header, ciphertext: ciphertext.into() }
    }

    /// Encode the container into a buffer.
    ///
    /// Writes: `[header (64 bytes)] + [ciphertext (variable)]`
    ///
    /// # Errors
    ///
    /// - `FormatError::CiphertextTooLarge` beyond
    ///   [`Self::MAX_CIPHERTEXT_SIZE`]
    /// - `FormatError::MisalignedCiphertext` if the ciphertext is empty
    ///   or not block-aligned
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<(), FormatError> {
        self.check_ciphertext()?;

        dst.put_slice(&self.header.to_bytes());
        dst.put_slice(&self.ciphertext);
        Ok(())
    }

    /// Encode the container to a fresh byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let mut buf = Vec::with_capacity(ContainerHeader::SIZE + self.ciphertext.len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode a container from untrusted bytes.
    ///
    /// Fails fast on structural corruption, before any cryptographic
    /// step runs.
    ///
    /// # Errors
    ///
    /// - `FormatError::TooShort` below [`Self::MIN_SIZE`]
    /// - `FormatError::InvalidMagic` / `FormatError::UnsupportedVersion`
    ///   from header parsing
    /// - `FormatError::CiphertextTooLarge` beyond
    ///   [`Self::MAX_CIPHERTEXT_SIZE`]
    /// - `FormatError::MisalignedCiphertext` if the remainder is not
    ///   block-aligned
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < Self::MIN_SIZE {
            return Err(FormatError::TooShort { expected: Self::MIN_SIZE, actual: bytes.len() });
        }

        let header = *ContainerHeader::from_bytes(bytes)?;
        let container = Self::new(header, &bytes[ContainerHeader::SIZE..]);
        container.check_ciphertext()?;

        Ok(container)
    }

    fn check_ciphertext(&self) -> Result<(), FormatError> {
        let len = self.ciphertext.len();

        if len > Self::MAX_CIPHERTEXT_SIZE {
            return Err(FormatError::CiphertextTooLarge {
                size: len,
                max: Self::MAX_CIPHERTEXT_SIZE,
            });
        }

        if len == 0 || len % BLOCK_SIZE != 0 {
            return Err(FormatError::MisalignedCiphertext { len });
        }

        Ok(())
    }
}
