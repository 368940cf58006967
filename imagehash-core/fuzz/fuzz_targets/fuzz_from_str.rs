#![no_main]

//! Fuzz target for FixedHash / ExtendedHash text parsing
//!
//! Anything that parses must print back to a string that parses to the
//! same value.
//!
//! Run with: cargo +nightly fuzz run fuzz_from_str

use imagehash_core::{ExtendedHash, FixedHash};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(hash) = text.parse::<FixedHash>() {
        let again: FixedHash = hash.to_string().parse().expect("fixed text round trip");
        assert_eq!(hash, again);
    }

    if let Ok(hash) = text.parse::<ExtendedHash>() {
        let again = ExtendedHash::from_str_with_bits(&hash.to_string(), hash.bits())
            .expect("extended text round trip");
        assert_eq!(hash, again);
    }
});
