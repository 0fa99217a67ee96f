//! Container header with zero-copy parsing.
//!
//! The `ContainerHeader` is a fixed 64-byte structure serialized as raw
//! binary (Big Endian). Every cleartext field of the container lives
//! here; only the ciphertext follows it on disk.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    IV_SIZE, TAG_SIZE,
    errors::FormatError,
};

/// Fixed 64-byte container header (Big Endian).
///
/// Fields are stored as raw byte arrays to avoid alignment issues. The
/// expiry is cleartext so a holder can see when a container unlocks
/// without knowing the password.
///
/// # Security
///
/// The `#[repr(C, packed)]` layout with zerocopy traits ensures this
/// struct can be safely cast from untrusted file bytes - all 64-byte
/// patterns are valid, preventing undefined behavior. Parsing checks
/// magic and version only; authenticity comes from the tag, which the
/// protocol layer verifies over [`Self::authenticated_prefix`] plus the
/// ciphertext. Binding the prefix (rather than the expiry alone) means
/// the version, expiry, AND iv are all covered: swapping any of them
/// after sealing invalidates the tag.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct ContainerHeader {
    // Format identification (8 bytes: 0-7)
    magic: [u8; 4],    // 0x4C424F58 ("LBOX" in ASCII)
    version: u8,       // 0x01
    reserved: [u8; 3], // zero

    // Time lock (8 bytes: 8-15)
    expiry: [u8; 8], // i64 seconds since the Unix epoch, UTC

    // Cipher input (16 bytes: 16-31)
    iv: [u8; IV_SIZE],

    // Authentication (32 bytes: 32-63)
    tag: [u8; TAG_SIZE], // HMAC-SHA256 over bytes 0..32 || ciphertext
}

impl ContainerHeader {
    /// Size of the serialized header (64 bytes)
    pub const SIZE: usize = 64;

    /// Magic number: "LBOX" in ASCII (0x4C424F58)
    pub const MAGIC: u32 = 0x4C42_4F58;

    /// Current format version
    pub const VERSION: u8 = 0x01;

    /// Length of the authenticated prefix (everything before the tag)
    pub const AUTH_PREFIX_SIZE: usize = 32;

    /// Create a header for a new container. The tag starts zeroed and is
    /// filled in via [`Self::set_tag`] once the ciphertext exists.
    #[must_use]
    pub fn new(expiry_unix: i64, iv: [u8; IV_SIZE]) -> Self {
        Self {
            magic: Self::MAGIC.to_be_bytes(),
            version: Self::VERSION,
            reserved: [0u8; 3],
            expiry: expiry_unix.to_be_bytes(),
            iv,
            tag: [0u8; TAG_SIZE],
        }
    }

    /// Parse a header from untrusted bytes (zero-copy, safe).
    ///
    /// # Errors
    ///
    /// - `FormatError::TooShort` if the buffer holds fewer than 64 bytes
    /// - `FormatError::InvalidMagic` if the magic number is wrong
    /// - `FormatError::UnsupportedVersion` for unknown format versions
    ///
    /// # Security
    ///
    /// Validation order is cheapest-first (size, magic, version) to fail
    /// fast on garbage. No authenticity is established here.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self, FormatError> {
        let header = Self::ref_from_prefix(bytes)
            .map_err(|_| FormatError::TooShort {
                expected: Self::SIZE,
                actual: bytes.len(),
            })?
            .0;

        if u32::from_be_bytes(header.magic) != Self::MAGIC {
            return Err(FormatError::InvalidMagic);
        }

        if header.version != Self::VERSION {
            return Err(FormatError::UnsupportedVersion(header.version));
        }

        Ok(header)
    }

    /// Serialize the header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let bytes = IntoBytes::as_bytes(self);
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(bytes);
        arr
    }

    /// Format magic number (0x4C424F58 = "LBOX").
    #[must_use]
    pub fn magic(&self) -> u32 {
        u32::from_be_bytes(self.magic)
    }

    /// Format version byte (currently 0x01).
    #[must_use]
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Expiry as seconds since the Unix epoch (UTC).
    #[must_use]
    pub fn expiry_unix(&self) -> i64 {
        i64::from_be_bytes(self.expiry)
    }

    /// Initialization vector for the container body.
    #[must_use]
    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }

    /// Stored authentication tag.
    #[must_use]
    pub fn tag(&self) -> &[u8; TAG_SIZE] {
        &self.tag
    }

    /// Bytes the tag authenticates, besides the ciphertext: magic,
    /// version, reserved, expiry, and iv (bytes 0..32).
    #[must_use]
    pub fn authenticated_prefix(&self) -> [u8; Self::AUTH_PREFIX_SIZE] {
        let bytes = self.to_bytes();
        let mut prefix = [0u8; Self::AUTH_PREFIX_SIZE];
        prefix.copy_from_slice(&bytes[..Self::AUTH_PREFIX_SIZE]);
        prefix
    }

    /// Set the authentication tag (computed by the protocol layer).
    pub fn set_tag(&mut self, tag: [u8; TAG_SIZE]) {
        self.tag = tag;
    }
}

// Manual Debug implementation (can't derive due to packed repr)
impl std::fmt::Debug for ContainerHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerHeader")
            .field("magic", &format!("{:#010x}", self.magic()))
            .field("version", &self.version())
            .field("expiry_unix", &self.expiry_unix())
            .finish_non_exhaustive()
    }
}

// Manual PartialEq implementation (can't derive due to packed repr)
impl PartialEq for ContainerHeader {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for ContainerHeader {}
