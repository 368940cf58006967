//! Variable-length hashes produced by the size-configurable algorithms.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use tracing::{debug, instrument, trace};

use super::{check_compatible, hamming_distance, FixedHash, ImageHash, FIXED_HASH_BITS};
use crate::codec::{self, KIND_SEPARATOR};
use crate::config::SimilarityConfig;
use crate::error::{HashError, Result};
use crate::kind::Kind;

/// Largest supported bit length (a 256×256 grid).
pub const MAX_HASH_BITS: usize = 256 * 256;

/// A `width × height`-bit perceptual hash.
///
/// The bits form one big-endian integer stored in `ceil(bits / 8)` bytes.
/// Bit index 0 is the most significant bit of that integer; unused high
/// bits of the first byte are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtendedHash {
    kind: Kind,
    bits: usize,
    bytes: Vec<u8>,
}

fn byte_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

fn check_length(bits: usize) -> Result<()> {
    if bits == 0 || bits > MAX_HASH_BITS {
        return Err(HashError::UnsupportedLength(bits));
    }
    Ok(())
}

impl ExtendedHash {
    /// Create an all-zero hash of `bits` bits.
    pub fn new(kind: Kind, bits: usize) -> Result<Self> {
        check_length(bits)?;
        Ok(Self {
            kind,
            bits,
            bytes: vec![0; byte_len(bits)],
        })
    }

    /// Create an all-zero hash for a `width × height` sample grid.
    pub fn with_dimensions(kind: Kind, width: u32, height: u32) -> Result<Self> {
        let bits = (width as usize)
            .checked_mul(height as usize)
            .ok_or(HashError::UnsupportedLength(usize::MAX))?;
        Self::new(kind, bits)
    }

    /// Set bit `index` (counted from the most significant end) to 1.
    ///
    /// Indices at or past [`bits`](Self::bits) are ignored.
    pub fn left_shift_set(&mut self, index: usize) {
        self.set_bit(index, true);
    }

    /// Set or clear bit `index` (counted from the most significant end).
    ///
    /// Indices at or past [`bits`](Self::bits) are ignored.
    pub fn set_bit(&mut self, index: usize, set: bool) {
        if let Some((byte, mask)) = self.locate(index) {
            if set {
                self.bytes[byte] |= mask;
            } else {
                self.bytes[byte] &= !mask;
            }
        }
    }

    /// Read bit `index` (counted from the most significant end).
    pub fn bit(&self, index: usize) -> bool {
        self.locate(index)
            .is_some_and(|(byte, mask)| self.bytes[byte] & mask != 0)
    }

    fn locate(&self, index: usize) -> Option<(usize, u8)> {
        if index >= self.bits {
            return None;
        }
        // Position counted from the least significant end of the integer.
        let position = self.bits - 1 - index;
        let byte = self.bytes.len() - 1 - position / 8;
        Some((byte, 1u8 << (position % 8)))
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Whether the bit length is a perfect square, as produced by the
    /// standard square-grid algorithms.
    pub fn is_square(&self) -> bool {
        let mut side = 0usize;
        while (side + 1) * (side + 1) <= self.bits {
            side += 1;
        }
        side * side == self.bits
    }

    /// Hamming distance to another extended hash of the same kind and length.
    pub fn distance(&self, other: &Self) -> Result<u32> {
        check_compatible(self.kind, self.bits, other.kind, other.bits)?;
        Ok(hamming_distance(&self.bytes, &other.bytes))
    }

    /// Like [`distance`](Self::distance), failing with
    /// [`HashError::NilOperand`] when there is nothing to compare against.
    pub fn distance_opt(&self, other: Option<&Self>) -> Result<u32> {
        self.distance(other.ok_or(HashError::NilOperand)?)
    }

    /// Check whether two hashes are within the configured distance, scaled to
    /// this hash's length.
    pub fn is_similar(&self, other: &Self, config: &SimilarityConfig) -> Result<bool> {
        let distance = self.distance(other)?;
        Ok(distance <= config.threshold_for_bits(self.bits))
    }

    /// The hash packed into `ceil(bits / 8)` big-endian bytes.
    pub fn byte_arr(&self) -> (Kind, &[u8]) {
        (self.kind, &self.bytes)
    }

    /// Rebuild a `bits`-bit hash from packed bytes.
    pub fn from_byte_arr(kind: Kind, bits: usize, bytes: &[u8]) -> Result<Self> {
        check_length(bits)?;
        let expected = byte_len(bits);
        if bytes.len() != expected {
            return Err(HashError::InvalidSize {
                expected,
                actual: bytes.len(),
            });
        }

        let spare = expected * 8 - bits;
        if spare > 0 && bytes[0] >> (8 - spare) != 0 {
            return Err(HashError::MalformedEncoding(format!(
                "value does not fit in {bits} bits"
            )));
        }

        Ok(Self {
            kind,
            bits,
            bytes: bytes.to_vec(),
        })
    }

    /// Parse the text form against an explicit bit length.
    ///
    /// [`FromStr`] infers the length from the digit count, which only works
    /// for multiples of 4; this accepts any length.
    pub fn from_str_with_bits(text: &str, bits: usize) -> Result<Self> {
        let (kind, payload) = codec::split_kind(text)?;
        check_length(bits)?;
        let bytes = codec::decode_hex(payload, byte_len(bits))?;
        Self::from_byte_arr(kind, bits, &bytes)
    }

    /// Write the binary form: kind code, bit length as a big-endian `u32`,
    /// then the packed bytes.
    pub fn dump<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        // check_length bounds bits well below u32::MAX
        let bits = self.bits as u32;
        let mut buf = Vec::with_capacity(5 + self.bytes.len());
        buf.push(self.kind.code());
        buf.extend_from_slice(&bits.to_be_bytes());
        buf.extend_from_slice(&self.bytes);
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Read a hash written by [`dump`](Self::dump).
    #[instrument(level = "trace", skip_all)]
    pub fn load<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let kind = codec::read_kind(reader)?;

        let mut length = [0u8; 4];
        codec::read_full(reader, &mut length)?;
        let bits = u32::from_be_bytes(length) as usize;
        if let Err(e) = check_length(bits) {
            debug!(bits, "Rejected dumped hash length");
            return Err(e);
        }

        let mut payload = vec![0u8; byte_len(bits)];
        codec::read_full(reader, &mut payload)?;

        let hash = Self::from_byte_arr(kind, bits, &payload)?;
        trace!(bits, kind = %kind, "Loaded extended hash");
        Ok(hash)
    }
}

impl ImageHash for ExtendedHash {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn bits(&self) -> usize {
        self.bits
    }

    fn byte_arr(&self) -> (Kind, Vec<u8>) {
        (self.kind, self.bytes.clone())
    }

    fn dump(&self, writer: &mut dyn Write) -> Result<()> {
        ExtendedHash::dump(self, writer)
    }
}

impl From<FixedHash> for ExtendedHash {
    fn from(hash: FixedHash) -> Self {
        let (kind, bytes) = hash.byte_arr();
        Self {
            kind,
            bits: FIXED_HASH_BITS,
            bytes: bytes.to_vec(),
        }
    }
}

impl fmt::Display for ExtendedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KIND_SEPARATOR}{}",
            self.kind.as_char(),
            codec::encode_hex(&self.bytes, self.bits.div_ceil(4))
        )
    }
}

impl FromStr for ExtendedHash {
    type Err = HashError;

    /// Parse `"<k>:<hex>"`, taking 4 bits per hex digit.
    fn from_str(text: &str) -> Result<Self> {
        let (_, payload) = codec::split_kind(text)?;
        Self::from_str_with_bits(text, payload.len() * 4)
    }
}

/// Serialized form: the text form plus the bit length, which the digit
/// count alone cannot recover for lengths that are not multiples of 4.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializedExtendedHash {
    hash: String,
    bits: usize,
}

#[cfg(feature = "serde")]
impl serde::Serialize for ExtendedHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SerializedExtendedHash {
            hash: self.to_string(),
            bits: self.bits,
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ExtendedHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let serialized = SerializedExtendedHash::deserialize(deserializer)?;
        Self::from_str_with_bits(&serialized.hash, serialized.bits).map_err(serde::de::Error::custom)
    }
}
