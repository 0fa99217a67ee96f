//! Lockbox protocol core.
//!
//! Orchestrates the time-locked container lifecycle: [`seal`] turns a
//! file payload, an expiry, and a password into container bytes;
//! [`open`] reverses it, but only once a trusted network clock says the
//! expiry has passed.
//!
//! # Operation flow
//!
//! ```text
//! seal: payload ─► encode ─► derive keys ─► fresh iv ─► AES-256-CBC
//!        ─► tag over header prefix ‖ ciphertext ─► container bytes
//!
//! open: bytes ─► decode ─► trusted time ─► time gate ─► derive keys
//!        ─► verify tag ─► decrypt ─► decode payload
//! ```
//!
//! Both operations are single synchronous requests with no persistent
//! state. `open` has exactly one suspension point - the bounded network
//! round-trip to the [`TrustedClock`] - and evaluates the time gate
//! strictly before any key material is derived, so a premature attempt
//! never touches the ciphertext.
//!
//! # Security
//!
//! Time Gate:
//! - The expiry comparison uses trusted network time only; the local
//!   clock is never consulted
//! - A failed or timed-out time query aborts the open (no fallback)
//!
//! Opaque Failures:
//! - Tag mismatch, wrong password, bad padding, and garbled payloads all
//!   collapse into one `IntegrityFailure` with a single message
//!
//! Authenticity:
//! - The tag binds the format version, expiry, iv, and ciphertext;
//!   altering any of them after sealing is detected

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod protocol;
pub mod time;

pub use error::LockboxError;
pub use protocol::{open, seal};
pub use time::{DEFAULT_NTP_SERVER, DEFAULT_TIMEOUT, FixedClock, SntpClock, TimeError, TrustedClock};

// Re-exported so front ends need only this crate
pub use lockbox_format::{Container, FilePayload};
