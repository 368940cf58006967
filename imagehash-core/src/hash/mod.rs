//! Perceptual hash values.
//!
//! Two concrete types share one comparison and codec contract:
//!
//! - [`FixedHash`]: 64 bits, produced by the standard 8×8 algorithms. Its
//!   binary form has no length field.
//! - [`ExtendedHash`]: `width × height` bits, produced by size-configurable
//!   variants. Its binary form carries the bit length.
//!
//! Both implement [`ImageHash`], so mixed collections can be compared with
//! [`distance_between`].
//!
//! # Usage
//!
//! ```
//! use imagehash_core::{FixedHash, Kind};
//!
//! let mut a = FixedHash::new(0, Kind::AHash);
//! let mut b = FixedHash::new(0, Kind::AHash);
//! a.left_shift_set(0);
//! a.left_shift_set(2);
//! b.left_shift_set(2);
//!
//! assert_eq!(a.distance(&b).unwrap(), 1);
//! assert_eq!(a.to_string(), "a:a000000000000000");
//! ```

mod extended;
mod fixed;

pub use extended::{ExtendedHash, MAX_HASH_BITS};
pub use fixed::{FixedHash, FIXED_HASH_BITS, FIXED_HASH_BYTES};

use std::fmt::Display;
use std::io::Write;

use tracing::debug;

use crate::error::{HashError, Result};
use crate::kind::Kind;

/// Capability set shared by every hash value.
pub trait ImageHash: Display {
    /// Algorithm that produced this hash.
    fn kind(&self) -> Kind;

    /// Declared bit length (64 for fixed hashes).
    fn bits(&self) -> usize;

    /// The bit pattern packed into `ceil(bits / 8)` bytes, most significant
    /// byte first.
    fn byte_arr(&self) -> (Kind, Vec<u8>);

    /// Write the binary form of this hash to `writer`.
    fn dump(&self, writer: &mut dyn Write) -> Result<()>;
}

/// Hamming distance between two arbitrary hash values.
///
/// Fails with [`HashError::NilOperand`] when `other` is absent, and with
/// [`HashError::KindMismatch`] / [`HashError::LengthMismatch`] when the two
/// are not comparable. A fixed hash is comparable with a 64-bit extended hash.
pub fn distance_between(this: &dyn ImageHash, other: Option<&dyn ImageHash>) -> Result<u32> {
    let other = other.ok_or(HashError::NilOperand)?;
    check_compatible(this.kind(), this.bits(), other.kind(), other.bits())?;

    let (_, left) = this.byte_arr();
    let (_, right) = other.byte_arr();
    Ok(hamming_distance(&left, &right))
}

/// Number of differing bits between two equally sized byte slices.
///
/// Bytes past the end of the shorter slice are ignored; callers check
/// lengths first.
pub fn hamming_distance(left: &[u8], right: &[u8]) -> u32 {
    left.iter()
        .zip(right.iter())
        .map(|(a, b)| (a ^ b).count_ones())
        .sum()
}

pub(crate) fn check_compatible(
    left_kind: Kind,
    left_bits: usize,
    right_kind: Kind,
    right_bits: usize,
) -> Result<()> {
    if left_kind != right_kind {
        debug!(left = %left_kind, right = %right_kind, "Rejected comparison of different hash kinds");
        return Err(HashError::KindMismatch {
            left: left_kind,
            right: right_kind,
        });
    }
    if left_bits != right_bits {
        debug!(
            left = left_bits,
            right = right_bits,
            "Rejected comparison of different hash lengths"
        );
        return Err(HashError::LengthMismatch {
            left: left_bits,
            right: right_bits,
        });
    }
    Ok(())
}
