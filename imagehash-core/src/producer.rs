//! Interface to the pixel-level hashing algorithms.
//!
//! The algorithms themselves (average, perception and difference hashing)
//! live outside this crate. They hand over finished values through these
//! traits, which are implemented for any matching function or closure.
//!
//! ```
//! use imagehash_core::{FixedHash, FixedHasher, Kind, Result};
//!
//! // A toy "image": one luminance byte per sample of an 8×8 grid.
//! fn average(samples: &[u8; 64]) -> Result<FixedHash> {
//!     let mean = samples.iter().map(|&s| u32::from(s)).sum::<u32>() / 64;
//!     let mut hash = FixedHash::new(0, Kind::AHash);
//!     for (i, &s) in samples.iter().enumerate() {
//!         hash.set_bit(i, u32::from(s) > mean);
//!     }
//!     Ok(hash)
//! }
//!
//! let mut samples = [0u8; 64];
//! samples[0] = 255;
//! let hash = average.hash(&samples).unwrap();
//! assert_eq!(hash.to_string(), "a:8000000000000000");
//! ```

use crate::error::Result;
use crate::hash::{ExtendedHash, FixedHash};

/// Produces 64-bit hashes from a decoded image of type `I`.
pub trait FixedHasher<I: ?Sized> {
    fn hash(&self, image: &I) -> Result<FixedHash>;
}

/// Produces `width × height`-bit hashes from a decoded image of type `I`.
pub trait ExtendedHasher<I: ?Sized> {
    fn hash(&self, image: &I, width: u32, height: u32) -> Result<ExtendedHash>;
}

impl<I: ?Sized, F> FixedHasher<I> for F
where
    F: Fn(&I) -> Result<FixedHash>,
{
    fn hash(&self, image: &I) -> Result<FixedHash> {
        self(image)
    }
}

impl<I: ?Sized, F> ExtendedHasher<I> for F
where
    F: Fn(&I, u32, u32) -> Result<ExtendedHash>,
{
    fn hash(&self, image: &I, width: u32, height: u32) -> Result<ExtendedHash> {
        self(image, width, height)
    }
}
