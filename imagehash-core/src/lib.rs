//! Imagehash Core - perceptual image hash values
//!
//! This crate represents, compares and transports perceptual image
//! fingerprints computed elsewhere by average, perception or difference
//! hashing.
//!
//! # Features
//!
//! - 64-bit fixed hashes and `width × height`-bit extended hashes
//! - Hamming distance with kind and length compatibility checks
//! - Text form `"<kind>:<hex>"` for humans and logs
//! - Compact binary form for persistence and transport
//! - Optional serde support (`serde` feature, on by default)
//!
//! # Example
//!
//! ```
//! use imagehash_core::{ExtendedHash, FixedHash, Kind};
//!
//! # fn example() -> imagehash_core::Result<()> {
//! let mut hash = FixedHash::new(0, Kind::PHash);
//! hash.left_shift_set(0);
//!
//! // Text round trip
//! let text = hash.to_string();
//! let parsed: FixedHash = text.parse()?;
//! assert_eq!(hash.distance(&parsed)?, 0);
//!
//! // Binary round trip of a 16×16 hash
//! let mut wide = ExtendedHash::with_dimensions(Kind::PHash, 16, 16)?;
//! wide.left_shift_set(200);
//! let mut buf = Vec::new();
//! wide.dump(&mut buf)?;
//! let loaded = ExtendedHash::load(&mut buf.as_slice())?;
//! assert_eq!(loaded.bits(), 256);
//! assert_eq!(wide.distance(&loaded)?, 0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod codec;
pub mod config;
pub mod error;
pub mod hash;
pub mod kind;
pub mod producer;

// Re-export main types for convenience
pub use codec::KIND_SEPARATOR;
pub use config::SimilarityConfig;
pub use error::{HashError, Result};
pub use hash::{
    distance_between, hamming_distance, ExtendedHash, FixedHash, ImageHash, FIXED_HASH_BITS,
    FIXED_HASH_BYTES, MAX_HASH_BITS,
};
pub use kind::Kind;
pub use producer::{ExtendedHasher, FixedHasher};
