//! Error types for Lockbox cryptographic operations.

use thiserror::Error;

/// Failures from cryptographic operations.
///
/// Variants deliberately carry no cause detail. Distinguishing a wrong
/// key from tampered data or bad padding would hand an attacker an
/// oracle; the protocol layer collapses both variants into one opaque
/// integrity failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// Authentication tag did not match
    #[error("authentication tag mismatch")]
    TagMismatch,

    /// Decryption or unpadding failed
    #[error("decryption failed")]
    DecryptionFailed,
}
