//! Lockbox container and payload codecs.
//!
//! Two wire formats live here, both free of cryptography:
//!
//! - [`Container`] is the persisted artifact: a fixed 64-byte header
//!   followed by the ciphertext. The header is raw binary (Big Endian)
//!   and parsed zero-copy, so structural corruption is rejected before
//!   any cryptographic step runs.
//! - [`FilePayload`] is the cleartext that gets encrypted: the original
//!   file's name, extension, and contents, length-prefixed so decoding
//!   is unambiguous for any input, including names containing separator
//!   characters.
//!
//! # Container layout
//!
//! ```text
//! offset  size  field
//! 0       4     magic 0x4C424F58 ("LBOX")
//! 4       1     format version (0x01)
//! 5       3     reserved (zero)
//! 8       8     expiry, i64 Big Endian seconds since the Unix epoch (UTC)
//! 16      16    iv, fresh per container
//! 32      32    tag, HMAC-SHA256 over bytes 0..32 and the ciphertext
//! 64      ...   ciphertext, AES-256-CBC with PKCS#7 padding
//! ```
//!
//! The layout is fixed and versioned; any compliant implementation can
//! round-trip another's output given the same keys.
//!
//! # Security
//!
//! - Structural validity only: a decoded container is well-formed, not
//!   authentic. Tag verification happens in the protocol layer.
//! - The expiry is cleartext and unauthenticated until the tag is
//!   checked; the codec carries it without acting on it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod container;
mod errors;
mod header;
mod payload;

pub use container::Container;
pub use errors::{FormatError, PayloadError};
pub use header::ContainerHeader;
pub use payload::FilePayload;

/// Cipher block size the ciphertext must align to (AES).
pub const BLOCK_SIZE: usize = 16;

/// Size of the iv field in bytes (one AES block).
pub const IV_SIZE: usize = 16;

/// Size of the tag field in bytes (HMAC-SHA256 output).
pub const TAG_SIZE: usize = 32;
