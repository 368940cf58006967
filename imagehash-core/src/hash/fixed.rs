//! 64-bit hashes produced by the standard 8×8 algorithms.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use tracing::{instrument, trace};

use super::{check_compatible, ExtendedHash, ImageHash};
use crate::codec::{self, KIND_SEPARATOR};
use crate::config::SimilarityConfig;
use crate::error::{HashError, Result};
use crate::kind::Kind;

/// Bit length of every fixed hash.
pub const FIXED_HASH_BITS: usize = 64;

/// Packed size of a fixed hash (64 bits = 8 bytes).
pub const FIXED_HASH_BYTES: usize = FIXED_HASH_BITS / 8;

/// Hex digits in the text form.
const FIXED_HASH_HEX_DIGITS: usize = FIXED_HASH_BITS / 4;

/// A 64-bit perceptual hash tagged with the algorithm that produced it.
///
/// Bit index 0 is the most significant bit of the underlying `u64`, matching
/// the left-to-right, top-to-bottom order in which producers scan samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FixedHash {
    kind: Kind,
    value: u64,
}

impl FixedHash {
    /// Create a hash from an initial bit pattern.
    pub fn new(value: u64, kind: Kind) -> Self {
        Self { kind, value }
    }

    /// Set bit `index` (counted from the most significant end) to 1.
    ///
    /// Indices past 63 are ignored.
    pub fn left_shift_set(&mut self, index: usize) {
        self.set_bit(index, true);
    }

    /// Set or clear bit `index` (counted from the most significant end).
    ///
    /// Indices past 63 are ignored.
    pub fn set_bit(&mut self, index: usize, set: bool) {
        if index >= FIXED_HASH_BITS {
            return;
        }
        let mask = 1u64 << (FIXED_HASH_BITS - 1 - index);
        if set {
            self.value |= mask;
        } else {
            self.value &= !mask;
        }
    }

    /// Read bit `index` (counted from the most significant end).
    pub fn bit(&self, index: usize) -> bool {
        index < FIXED_HASH_BITS && self.value & (1u64 << (FIXED_HASH_BITS - 1 - index)) != 0
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn bits(&self) -> usize {
        FIXED_HASH_BITS
    }

    /// Hamming distance to another fixed hash of the same kind.
    pub fn distance(&self, other: &Self) -> Result<u32> {
        check_compatible(self.kind, FIXED_HASH_BITS, other.kind, FIXED_HASH_BITS)?;
        Ok((self.value ^ other.value).count_ones())
    }

    /// Like [`distance`](Self::distance), failing with
    /// [`HashError::NilOperand`] when there is nothing to compare against.
    pub fn distance_opt(&self, other: Option<&Self>) -> Result<u32> {
        self.distance(other.ok_or(HashError::NilOperand)?)
    }

    /// Check whether two hashes are within the configured distance.
    pub fn is_similar(&self, other: &Self, config: &SimilarityConfig) -> Result<bool> {
        let distance = self.distance(other)?;
        Ok(distance <= config.threshold_for_bits(FIXED_HASH_BITS))
    }

    /// The hash as 8 big-endian bytes.
    pub fn byte_arr(&self) -> (Kind, [u8; FIXED_HASH_BYTES]) {
        (self.kind, self.value.to_be_bytes())
    }

    /// Rebuild a hash from the output of [`byte_arr`](Self::byte_arr).
    pub fn from_byte_arr(kind: Kind, bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; FIXED_HASH_BYTES] =
            bytes.try_into().map_err(|_| HashError::InvalidSize {
                expected: FIXED_HASH_BYTES,
                actual: bytes.len(),
            })?;
        Ok(Self::new(u64::from_be_bytes(bytes), kind))
    }

    /// Write the binary form: kind code followed by 8 big-endian bytes.
    pub fn dump<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let mut buf = [0u8; 1 + FIXED_HASH_BYTES];
        buf[0] = self.kind.code();
        buf[1..].copy_from_slice(&self.value.to_be_bytes());
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Read a hash written by [`dump`](Self::dump).
    #[instrument(level = "trace", skip_all)]
    pub fn load<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let kind = codec::read_kind(reader)?;
        let mut payload = [0u8; FIXED_HASH_BYTES];
        codec::read_full(reader, &mut payload)?;

        let hash = Self::new(u64::from_be_bytes(payload), kind);
        trace!(%hash, "Loaded fixed hash");
        Ok(hash)
    }
}

impl ImageHash for FixedHash {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn bits(&self) -> usize {
        FIXED_HASH_BITS
    }

    fn byte_arr(&self) -> (Kind, Vec<u8>) {
        (self.kind, self.value.to_be_bytes().to_vec())
    }

    fn dump(&self, writer: &mut dyn Write) -> Result<()> {
        FixedHash::dump(self, writer)
    }
}

impl fmt::Display for FixedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KIND_SEPARATOR}{:0width$x}",
            self.kind.as_char(),
            self.value,
            width = FIXED_HASH_HEX_DIGITS
        )
    }
}

impl FromStr for FixedHash {
    type Err = HashError;

    fn from_str(text: &str) -> Result<Self> {
        let (kind, payload) = codec::split_kind(text)?;
        let bytes = codec::decode_hex(payload, FIXED_HASH_BYTES)?;
        Self::from_byte_arr(kind, &bytes)
    }
}

impl TryFrom<&ExtendedHash> for FixedHash {
    type Error = HashError;

    fn try_from(hash: &ExtendedHash) -> Result<Self> {
        if hash.bits() != FIXED_HASH_BITS {
            return Err(HashError::LengthMismatch {
                left: FIXED_HASH_BITS,
                right: hash.bits(),
            });
        }
        let (kind, bytes) = hash.byte_arr();
        Self::from_byte_arr(kind, bytes)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FixedHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FixedHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
