//! Seal and open orchestration.
//!
//! The two protocol operations, in the exact order the container's
//! security depends on. Sealing is pure except for iv generation;
//! opening gates on trusted time before any key material exists.

use chrono::{DateTime, Utc};
use lockbox_crypto::{
    IV_SIZE, compute_tag, decrypt_payload, derive_keys, encrypt_payload, verify_tag,
};
use lockbox_format::{Container, ContainerHeader, FilePayload, FormatError};
use rand::{RngCore, rngs::OsRng};

use crate::{error::LockboxError, time::TrustedClock};

/// Seal a payload into a time-locked container.
///
/// The expiry may be any well-formed timestamp, including one already in
/// the past (which yields an immediately openable container); enforcing
/// a future expiry is a front-end concern. Sub-second precision is
/// truncated to whole seconds on the wire.
///
/// # Errors
///
/// - `Io` for unencodable payloads (name beyond the length prefix,
///   contents beyond the container size limit) and entropy-source
///   failure. Sealing has no cryptographic error paths.
pub fn seal(
    payload: &FilePayload,
    expiry: DateTime<Utc>,
    password: &str,
) -> Result<Vec<u8>, LockboxError> {
    if password.is_empty() {
        tracing::warn!("sealing with an empty password");
    }

    let plaintext = payload.encode().map_err(invalid_input)?;

    let keys = derive_keys(password);

    let mut iv = [0u8; IV_SIZE];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|err| LockboxError::Io(std::io::Error::other(err.to_string())))?;

    let ciphertext = encrypt_payload(&plaintext, keys.enc_key(), &iv);

    let mut header = ContainerHeader::new(expiry.timestamp(), iv);
    let tag = compute_tag(keys.mac_key(), &[&header.authenticated_prefix(), &ciphertext]);
    header.set_tag(tag);

    let container = Container::new(header, ciphertext);
    tracing::debug!(%expiry, ciphertext_len = container.ciphertext.len(), "sealed container");

    container.to_bytes().map_err(invalid_input)
}

/// Open a container, returning the original payload.
///
/// Steps run in a fixed order: structural decode, trusted time
/// acquisition, time gate, key derivation, tag verification, decryption,
/// payload decode. The time gate sits before key derivation so a
/// premature attempt never touches cryptographic material, and the tag
/// is verified before the ciphertext is interpreted.
///
/// # Errors
///
/// - `MalformedContainer` for structural corruption (before any crypto)
/// - `TimeUnavailable` if the trusted clock cannot answer (hard abort)
/// - `StillLocked` while trusted time is before the expiry
/// - `IntegrityFailure` for everything after the gate: tag mismatch,
///   wrong password, bad padding, or a garbled payload - one opaque
///   outcome, by construction indistinguishable
pub fn open(
    container_bytes: &[u8],
    password: &str,
    clock: &impl TrustedClock,
) -> Result<FilePayload, LockboxError> {
    let container = Container::decode(container_bytes)?;

    let seconds = container.header.expiry_unix();
    let expiry = DateTime::from_timestamp(seconds, 0)
        .ok_or(LockboxError::MalformedContainer(FormatError::ExpiryOutOfRange { seconds }))?;

    // Hard gate: no trusted time, no decryption.
    let now = clock.now_utc()?;

    if now < expiry {
        tracing::info!(%now, %expiry, "container still locked");
        return Err(LockboxError::StillLocked { now, expiry });
    }

    let keys = derive_keys(password);

    verify_tag(
        keys.mac_key(),
        &[&container.header.authenticated_prefix(), &container.ciphertext],
        container.header.tag(),
    )
    .map_err(|_| LockboxError::IntegrityFailure)?;

    let plaintext = decrypt_payload(&container.ciphertext, keys.enc_key(), container.header.iv())
        .map_err(|_| LockboxError::IntegrityFailure)?;

    let payload = FilePayload::decode(&plaintext).map_err(|_| LockboxError::IntegrityFailure)?;

    tracing::debug!(name = %payload.name, size = payload.contents.len(), "container opened");
    Ok(payload)
}

fn invalid_input(err: impl std::fmt::Display) -> LockboxError {
    LockboxError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()))
}
