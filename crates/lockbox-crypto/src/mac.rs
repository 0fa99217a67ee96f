//! Container authentication using HMAC-SHA256

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{error::CryptoError, keys::KEY_SIZE};

type HmacSha256 = Hmac<Sha256>;

/// Size of the authentication tag in bytes (SHA-256 output).
pub const TAG_SIZE: usize = 32;

/// Compute the authentication tag over the given message parts.
///
/// Parts are fed to the MAC in order, equivalent to MACing their
/// concatenation. Callers must keep the part structure fixed-width or
/// length-delimited so the concatenation stays unambiguous.
pub fn compute_tag(mac_key: &[u8; KEY_SIZE], parts: &[&[u8]]) -> [u8; TAG_SIZE] {
    let mut mac = new_mac(mac_key);
    for part in parts {
        mac.update(part);
    }

    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Verify an authentication tag.
///
/// The comparison runs in constant time.
///
/// # Errors
///
/// - `TagMismatch` if the recomputed tag differs. A tampered message and
///   a wrong key are indistinguishable.
pub fn verify_tag(
    mac_key: &[u8; KEY_SIZE],
    parts: &[&[u8]],
    tag: &[u8; TAG_SIZE],
) -> Result<(), CryptoError> {
    let mut mac = new_mac(mac_key);
    for part in parts {
        mac.update(part);
    }

    mac.verify_slice(tag).map_err(|_| CryptoError::TagMismatch)
}

fn new_mac(mac_key: &[u8; KEY_SIZE]) -> HmacSha256 {
    let Ok(mac) = HmacSha256::new_from_slice(mac_key) else {
        unreachable!("HMAC-SHA256 accepts any key size");
    };
    mac
}
