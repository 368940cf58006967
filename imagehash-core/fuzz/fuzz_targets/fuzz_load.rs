#![no_main]

//! Fuzz target for FixedHash::load() / ExtendedHash::load()
//!
//! Arbitrary streams must never panic, and anything that loads must dump
//! back to the bytes it was read from.
//!
//! Run with: cargo +nightly fuzz run fuzz_load

use imagehash_core::{ExtendedHash, FixedHash};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(hash) = FixedHash::load(&mut &data[..]) {
        let mut out = Vec::new();
        hash.dump(&mut out).expect("dump to Vec");
        assert_eq!(&data[..out.len()], &out[..]);
    }

    if let Ok(hash) = ExtendedHash::load(&mut &data[..]) {
        let mut out = Vec::new();
        hash.dump(&mut out).expect("dump to Vec");
        assert_eq!(&data[..out.len()], &out[..]);
    }
});
