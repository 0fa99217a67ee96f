//! Error types for the Lockbox wire formats.
//!
//! Structural errors only. Nothing here distinguishes cryptographic
//! outcomes; a container that parses cleanly can still fail tag
//! verification in the protocol layer.

use thiserror::Error;

/// Structural failures while encoding or decoding a container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input shorter than the smallest valid container
    #[error("container too short: need at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum byte count for a valid container
        expected: usize,
        /// Actual input length
        actual: usize,
    },

    /// Magic number mismatch
    #[error("invalid container magic")]
    InvalidMagic,

    /// Unsupported format version
    #[error("unsupported container version: {0:#04x}")]
    UnsupportedVersion(u8),

    /// Ciphertext exceeds the single-shot size limit
    #[error("ciphertext too large: {size} bytes exceeds maximum {max}")]
    CiphertextTooLarge {
        /// Ciphertext length in bytes
        size: usize,
        /// Maximum permitted length
        max: usize,
    },

    /// Ciphertext length is not a positive multiple of the block size
    #[error("ciphertext length {len} is not a positive multiple of the cipher block size")]
    MisalignedCiphertext {
        /// Offending ciphertext length
        len: usize,
    },

    /// Expiry seconds cannot be represented as a calendar timestamp
    #[error("expiry timestamp {seconds} is outside the representable range")]
    ExpiryOutOfRange {
        /// Raw wire value
        seconds: i64,
    },
}

/// Failures while encoding or decoding the cleartext payload.
///
/// On the decode path these only ever surface after decryption, and the
/// protocol layer collapses them into its opaque integrity failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Input ended inside a field
    #[error("payload truncated while reading {field}")]
    Truncated {
        /// Field being read when input ran out
        field: &'static str,
    },

    /// A text field held invalid UTF-8
    #[error("payload {field} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offending field
        field: &'static str,
    },

    /// A field exceeds its length prefix's range
    #[error("payload {field} too long: {len} bytes exceeds maximum {max}")]
    FieldTooLong {
        /// Offending field
        field: &'static str,
        /// Actual field length
        len: usize,
        /// Maximum encodable length
        max: usize,
    },
}
