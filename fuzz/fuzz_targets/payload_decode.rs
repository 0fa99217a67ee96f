//! Fuzz target for FilePayload::decode
//!
//! The payload decoder runs on freshly decrypted plaintext, which under a
//! wrong key is effectively random bytes. It must reject anything
//! malformed without panicking:
//! - Truncated length prefixes and field bodies
//! - Length prefixes pointing past the input
//! - Non-UTF-8 name and extension fields
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lockbox_format::FilePayload;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = FilePayload::decode(data) {
        // Anything that decodes must round-trip
        let encoded = payload.encode().expect("decoded payload must re-encode");
        assert_eq!(encoded, data);
    }
});
