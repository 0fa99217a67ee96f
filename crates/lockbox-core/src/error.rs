//! Error types for the Lockbox protocol core.
//!
//! One taxonomy for everything a seal or open can return. Every failure
//! is terminal for its invocation: nothing is retried and nothing is
//! corrected silently.

use chrono::{DateTime, Utc};
use lockbox_format::FormatError;
use thiserror::Error;

use crate::time::TimeError;

/// Outcomes of a failed seal or open.
///
/// # Security
///
/// `IntegrityFailure` deliberately covers tag mismatch, wrong password,
/// bad padding, and malformed decrypted payloads with a single static
/// message. Splitting these would hand an attacker a padding or
/// integrity oracle.
#[derive(Error, Debug)]
pub enum LockboxError {
    /// The trusted time authority could not be queried.
    ///
    /// Fatal for the open attempt; the local clock is never used as a
    /// fallback for the expiry comparison.
    #[error("trusted time unavailable: {0}")]
    TimeUnavailable(#[from] TimeError),

    /// The expiry has not been reached yet.
    ///
    /// A normal denied-access outcome, not an exceptional one: the
    /// container is intact, the time is simply not up.
    #[error("still locked: trusted time is {now}, container unlocks at {expiry}")]
    StillLocked {
        /// Trusted time at the moment of the attempt
        now: DateTime<Utc>,
        /// When the container unlocks
        expiry: DateTime<Utc>,
    },

    /// Authentication or decryption failed.
    #[error("integrity check failed: container tampered with or wrong password")]
    IntegrityFailure,

    /// The container is structurally invalid (rejected before any
    /// cryptographic step).
    #[error("malformed container: {0}")]
    MalformedContainer(#[from] FormatError),

    /// File system or entropy-source failure, propagated as-is.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
