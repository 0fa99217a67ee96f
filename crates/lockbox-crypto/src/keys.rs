//! Password key derivation using HKDF

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

/// Label for deriving the encryption key
const ENC_KEY_LABEL: &[u8] = b"lockboxEncV1";

/// Label for deriving the authentication key
const MAC_KEY_LABEL: &[u8] = b"lockboxMacV1";

/// Size of each derived key in bytes (AES-256 key size)
pub const KEY_SIZE: usize = 32;

/// Encryption/authentication key pair derived from a password.
///
/// Held only for the duration of one seal or open call, never persisted.
/// Both keys are zeroized on drop.
pub struct DerivedKeys {
    enc_key: [u8; KEY_SIZE],
    mac_key: [u8; KEY_SIZE],
}

impl DerivedKeys {
    /// 32-byte AES-256-CBC encryption key.
    pub fn enc_key(&self) -> &[u8; KEY_SIZE] {
        &self.enc_key
    }

    /// 32-byte HMAC-SHA256 authentication key.
    pub fn mac_key(&self) -> &[u8; KEY_SIZE] {
        &self.mac_key
    }
}

impl Drop for DerivedKeys {
    fn drop(&mut self) {
        self.enc_key.zeroize();
        self.mac_key.zeroize();
    }
}

/// Derive the encryption and authentication keys from a password.
///
/// HKDF-SHA256 expands the UTF-8 password bytes under two fixed labels,
/// one per role. Derivation is password-only: no salt is mixed in, so
/// identical passwords yield identical keys across containers and the
/// password is the entire security margin.
///
/// # Security
///
/// - Deterministic: `open` must re-derive exactly the seal-time keys
/// - Role separation: the two keys use distinct labels and are never
///   interchangeable
/// - Different passwords produce unrelated pairs with overwhelming
///   probability
pub fn derive_keys(password: &str) -> DerivedKeys {
    let hkdf = Hkdf::<Sha256>::new(None, password.as_bytes());

    let mut enc_key = [0u8; KEY_SIZE];
    let Ok(()) = hkdf.expand(ENC_KEY_LABEL, &mut enc_key) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };

    let mut mac_key = [0u8; KEY_SIZE];
    let Ok(()) = hkdf.expand(MAC_KEY_LABEL, &mut mac_key) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };

    DerivedKeys { enc_key, mac_key }
}
