//! Lockbox Cryptographic Primitives
//!
//! Building blocks for the Lockbox container: password key derivation,
//! AES-256-CBC body encryption, and HMAC-SHA256 authentication. Pure
//! functions with deterministic outputs. Callers provide random bytes
//! (the iv) for deterministic testing.
//!
//! # Key Lifecycle
//!
//! Every seal or open derives a fresh key pair from the password and
//! discards it when the call returns. Nothing is cached or persisted.
//!
//! ```text
//! Password
//!     │
//!     ▼
//! HKDF-SHA256 ─► enc_key ─► AES-256-CBC ─► ciphertext
//!     │
//!     └────────► mac_key ─► HMAC-SHA256 ─► tag
//! ```
//!
//! # Security
//!
//! Role Separation:
//! - Encryption and authentication use independent keys derived under
//!   distinct labels
//! - Neither key is trivially derivable from the other
//!
//! Oracle Resistance:
//! - Tag comparison runs in constant time
//! - Decryption failures carry no cause detail (wrong key, tampered
//!   ciphertext, and bad padding are indistinguishable)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
mod keys;
mod mac;

pub use cipher::{BLOCK_SIZE, IV_SIZE, decrypt_payload, encrypt_payload};
pub use error::CryptoError;
pub use keys::{DerivedKeys, KEY_SIZE, derive_keys};
pub use mac::{TAG_SIZE, compute_tag, verify_tag};
