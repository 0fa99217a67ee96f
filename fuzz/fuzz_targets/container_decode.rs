//! Fuzz target for Container::decode
//!
//! This fuzzer tests container decoding with arbitrary byte sequences to find:
//! - Parser crashes or panics
//! - Integer overflows in size calculations
//! - Buffer over-reads
//! - Malformed headers that bypass validation
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lockbox_format::Container;

fuzz_target!(|data: &[u8]| {
    // Attempt to decode arbitrary bytes as a container
    // This should never panic, only return Err for invalid data
    if let Ok(container) = Container::decode(data) {
        // Anything that decodes must re-encode to the same bytes
        let encoded = container.to_bytes().expect("decoded container must re-encode");
        assert_eq!(encoded, data);
    }
});
