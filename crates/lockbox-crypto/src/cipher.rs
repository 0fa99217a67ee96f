//! Container body encryption using AES-256-CBC
//!
//! All functions are pure - the iv must be provided by the caller. The
//! protocol layer owns the CSPRNG.

use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};

use crate::{error::CryptoError, keys::KEY_SIZE};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of the initialization vector (one cipher block).
pub const IV_SIZE: usize = BLOCK_SIZE;

/// Encrypt a cleartext payload with AES-256-CBC.
///
/// The plaintext is PKCS#7-padded, so the ciphertext is always a nonzero
/// multiple of [`BLOCK_SIZE`]; an empty plaintext encrypts to one full
/// block of padding.
///
/// # Security
///
/// - The iv MUST be fresh CSPRNG output for every call. CBC leaks
///   plaintext relationships under iv reuse.
/// - The ciphertext is malleable on its own; callers must authenticate
///   it with [`crate::compute_tag`] before trusting a decryption.
pub fn encrypt_payload(plaintext: &[u8], key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE]) -> Vec<u8> {
    Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt a container body with AES-256-CBC and strip the padding.
///
/// # Errors
///
/// - `DecryptionFailed` if the ciphertext length is not a nonzero
///   multiple of the block size, or the padding is invalid after
///   decryption (wrong key or tampered ciphertext). The error is
///   deliberately cause-free.
pub fn decrypt_payload(
    ciphertext: &[u8],
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::DecryptionFailed);
    }

    Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::derive_keys;

    fn test_key() -> [u8; KEY_SIZE] {
        *derive_keys("cipher-test-password").enc_key()
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = test_key();
        let iv = [0x42u8; IV_SIZE];
        let plaintext = b"attack at dawn";

        let ciphertext = encrypt_payload(plaintext, &key, &iv);
        let decrypted = decrypt_payload(&ciphertext, &key, &iv).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn empty_plaintext_encrypts_to_one_block() {
        let key = test_key();
        let iv = [0u8; IV_SIZE];

        let ciphertext = encrypt_payload(b"", &key, &iv);
        assert_eq!(ciphertext.len(), BLOCK_SIZE);

        let decrypted = decrypt_payload(&ciphertext, &key, &iv).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn ciphertext_is_padded_to_block_size() {
        let key = test_key();
        let iv = [0u8; IV_SIZE];

        for len in 0..=(2 * BLOCK_SIZE) {
            let plaintext = vec![0xA5u8; len];
            let ciphertext = encrypt_payload(&plaintext, &key, &iv);

            // PKCS#7 always appends at least one padding byte
            let expected = (len / BLOCK_SIZE + 1) * BLOCK_SIZE;
            assert_eq!(ciphertext.len(), expected, "wrong length for plaintext of {len} bytes");
        }
    }

    #[test]
    fn large_payload_roundtrip() {
        let key = test_key();
        let iv = [0x11u8; IV_SIZE];
        let plaintext = vec![0x5Au8; 64 * 1024];

        let ciphertext = encrypt_payload(&plaintext, &key, &iv);
        let decrypted = decrypt_payload(&ciphertext, &key, &iv).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let iv = [0u8; IV_SIZE];
        let ciphertext = encrypt_payload(b"secret", &test_key(), &iv);

        let wrong_key = *derive_keys("not-the-password").enc_key();
        let result = decrypt_payload(&ciphertext, &wrong_key, &iv);

        assert_eq!(result, Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn misaligned_ciphertext_is_rejected() {
        let key = test_key();
        let iv = [0u8; IV_SIZE];

        assert_eq!(decrypt_payload(&[], &key, &iv), Err(CryptoError::DecryptionFailed));
        assert_eq!(decrypt_payload(&[0u8; 15], &key, &iv), Err(CryptoError::DecryptionFailed));
        assert_eq!(decrypt_payload(&[0u8; 17], &key, &iv), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn different_ivs_produce_different_ciphertexts() {
        let key = test_key();
        let plaintext = b"same plaintext";

        let ct1 = encrypt_payload(plaintext, &key, &[0x00u8; IV_SIZE]);
        let ct2 = encrypt_payload(plaintext, &key, &[0xFFu8; IV_SIZE]);

        assert_ne!(ct1, ct2);
    }

    #[test]
    fn roundtrip_for_arbitrary_plaintexts() {
        use proptest::prelude::*;

        let key = test_key();
        proptest!(|(
            plaintext in prop::collection::vec(any::<u8>(), 0..512),
            iv in any::<[u8; IV_SIZE]>(),
        )| {
            let ciphertext = encrypt_payload(&plaintext, &key, &iv);
            prop_assert_eq!(ciphertext.len() % BLOCK_SIZE, 0);
            prop_assert!(ciphertext.len() > plaintext.len(), "padding always grows the input");

            let decrypted = decrypt_payload(&ciphertext, &key, &iv).unwrap();
            prop_assert_eq!(decrypted, plaintext);
        });
    }

    #[test]
    fn decrypting_with_wrong_iv_garbles_or_fails() {
        let key = test_key();
        let plaintext = b"iv matters for the first block";

        let ciphertext = encrypt_payload(plaintext, &key, &[0x01u8; IV_SIZE]);

        // A wrong iv garbles only the first block; the result either
        // fails to unpad or differs from the plaintext. Either way the
        // original bytes never come back.
        match decrypt_payload(&ciphertext, &key, &[0x02u8; IV_SIZE]) {
            Ok(garbled) => assert_ne!(garbled, plaintext),
            Err(err) => assert_eq!(err, CryptoError::DecryptionFailed),
        }
    }
}
