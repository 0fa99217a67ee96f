//! Cleartext payload codec.
//!
//! The payload is what gets encrypted: the source file's name (without
//! extension), its extension (without the dot), and its raw contents.
//! Fields are length-prefixed rather than delimiter-separated so any
//! name round-trips, including names containing separator characters.

use crate::errors::PayloadError;

/// Maximum encodable length for the name and extension fields.
const MAX_FIELD_LEN: usize = u16::MAX as usize;

/// A file reconstructed from (or destined for) a container.
///
/// # Invariants
///
/// - Round Trip: `decode(encode(p)) == p` for every payload, including
///   empty contents, empty extensions, and arbitrary Unicode names.
/// - The wire encoding is injective: two distinct payloads never encode
///   to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// File name without extension (may be empty)
    pub name: String,
    /// File extension without the leading dot (may be empty)
    pub extension: String,
    /// Raw file contents (may be empty)
    pub contents: Vec<u8>,
}

impl FilePayload {
    /// Create a payload from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        extension: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        Self { name: name.into(), extension: extension.into(), contents: contents.into() }
    }

    /// Encode the payload for encryption.
    ///
    /// Wire layout:
    /// `[u16 BE name_len] [name] [u16 BE ext_len] [extension] [contents]`
    ///
    /// # Errors
    ///
    /// - `PayloadError::FieldTooLong` if the name or extension exceeds
    ///   65535 UTF-8 bytes
    pub fn encode(&self) -> Result<Vec<u8>, PayloadError> {
        let name = self.name.as_bytes();
        let extension = self.extension.as_bytes();

        check_field_len("name", name.len())?;
        check_field_len("extension", extension.len())?;

        let mut buf = Vec::with_capacity(4 + name.len() + extension.len() + self.contents.len());
        buf.extend_from_slice(&(name.len() as u16).to_be_bytes());
        buf.extend_from_slice(name);
        buf.extend_from_slice(&(extension.len() as u16).to_be_bytes());
        buf.extend_from_slice(extension);
        buf.extend_from_slice(&self.contents);

        Ok(buf)
    }

    /// Decode a decrypted payload.
    ///
    /// # Errors
    ///
    /// - `PayloadError::Truncated` if the input ends inside a field
    /// - `PayloadError::InvalidUtf8` if the name or extension is not
    ///   valid UTF-8
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let (name, rest) = read_string(bytes, "name")?;
        let (extension, contents) = read_string(rest, "extension")?;

        Ok(Self { name, extension, contents: contents.to_vec() })
    }
}

fn check_field_len(field: &'static str, len: usize) -> Result<(), PayloadError> {
    if len > MAX_FIELD_LEN {
        return Err(PayloadError::FieldTooLong { field, len, max: MAX_FIELD_LEN });
    }
    Ok(())
}

/// Read one length-prefixed UTF-8 field, returning it and the remainder.
fn read_string<'a>(
    bytes: &'a [u8],
    field: &'static str,
) -> Result<(String, &'a [u8]), PayloadError> {
    let (len_bytes, rest) =
        bytes.split_at_checked(2).ok_or(PayloadError::Truncated { field })?;

    // split_at_checked guarantees exactly two bytes
    let len = usize::from(u16::from_be_bytes([len_bytes[0], len_bytes[1]]));

    let (value, rest) = rest.split_at_checked(len).ok_or(PayloadError::Truncated { field })?;

    let value =
        String::from_utf8(value.to_vec()).map_err(|_| PayloadError::InvalidUtf8 { field })?;

    Ok((value, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_plain_file() {
        let payload = FilePayload::new("report", "pdf", b"%PDF-1.7".to_vec());
        let decoded = FilePayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn roundtrip_empty_file() {
        let payload = FilePayload::new("a", "txt", Vec::new());
        let decoded = FilePayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);
        assert!(decoded.contents.is_empty());
    }

    #[test]
    fn roundtrip_empty_extension() {
        let payload = FilePayload::new("Makefile", "", b"all:\n".to_vec());
        let decoded = FilePayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn roundtrip_name_containing_separators() {
        // Names with ':' or '.' must survive; the length prefixes make
        // the encoding injective where a delimiter could not.
        let payload = FilePayload::new("we:ird.na:me", "tar.gz", b"data".to_vec());
        let decoded = FilePayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn roundtrip_unicode_name() {
        let payload = FilePayload::new("\u{00fc}bersicht \u{1F512}", "md", b"# notes".to_vec());
        let decoded = FilePayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn contents_may_contain_anything() {
        let contents: Vec<u8> = (0..=255).collect();
        let payload = FilePayload::new("bin", "dat", contents.clone());
        let decoded = FilePayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded.contents, contents);
    }

    #[test]
    fn encode_rejects_oversized_name() {
        let payload = FilePayload::new("x".repeat(MAX_FIELD_LEN + 1), "txt", Vec::new());
        let result = payload.encode();
        assert_eq!(
            result,
            Err(PayloadError::FieldTooLong {
                field: "name",
                len: MAX_FIELD_LEN + 1,
                max: MAX_FIELD_LEN
            })
        );
    }

    #[test]
    fn decode_rejects_truncated_length_prefix() {
        let result = FilePayload::decode(&[0x00]);
        assert_eq!(result, Err(PayloadError::Truncated { field: "name" }));
    }

    #[test]
    fn decode_rejects_truncated_field_body() {
        // Claims a 5-byte name but provides 2
        let result = FilePayload::decode(&[0x00, 0x05, b'a', b'b']);
        assert_eq!(result, Err(PayloadError::Truncated { field: "name" }));
    }

    #[test]
    fn decode_rejects_missing_extension() {
        // Valid name field, then nothing
        let result = FilePayload::decode(&[0x00, 0x01, b'a']);
        assert_eq!(result, Err(PayloadError::Truncated { field: "extension" }));
    }

    #[test]
    fn decode_rejects_invalid_utf8_name() {
        let result = FilePayload::decode(&[0x00, 0x02, 0xFF, 0xFE, 0x00, 0x00]);
        assert_eq!(result, Err(PayloadError::InvalidUtf8 { field: "name" }));
    }

    #[test]
    fn empty_input_is_truncated_not_empty_payload() {
        let result = FilePayload::decode(&[]);
        assert_eq!(result, Err(PayloadError::Truncated { field: "name" }));
    }
}
