//! Fuzz target for the full open path on hostile containers
//!
//! Drives lockbox_core::open with arbitrary bytes against a fixed clock,
//! exercising structural decode, the time gate, tag verification, and
//! decryption in one pipeline. Every input must produce a typed error or
//! a valid payload - never a panic, whatever the password.

#![no_main]

use chrono::DateTime;
use libfuzzer_sys::fuzz_target;
use lockbox_core::{FixedClock, open};

fuzz_target!(|input: (&[u8], &str)| {
    let (data, password) = input;

    // Far enough ahead that any embedded expiry has usually passed, so
    // the cryptographic stages get exercised too
    let clock = FixedClock(DateTime::from_timestamp(4_000_000_000, 0).unwrap());

    let _ = open(data, password, &clock);
});
