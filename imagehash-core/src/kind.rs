//! Algorithm tags carried by every hash value.

use std::fmt;

use crate::error::{HashError, Result};

/// Identifies which perceptual hashing algorithm produced a hash.
///
/// Two hashes are only comparable when their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Kind {
    /// Hand-built or untagged values (mostly tests)
    #[default]
    Unknown,
    /// Average hash
    AHash,
    /// Perception (DCT) hash
    PHash,
    /// Difference hash
    DHash,
}

impl Kind {
    /// All kinds, in binary code order.
    pub const ALL: [Kind; 4] = [Kind::Unknown, Kind::AHash, Kind::PHash, Kind::DHash];

    /// Character used as the prefix of the text form.
    pub fn as_char(self) -> char {
        match self {
            Self::Unknown => 'u',
            Self::AHash => 'a',
            Self::PHash => 'p',
            Self::DHash => 'd',
        }
    }

    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'u' => Ok(Self::Unknown),
            'a' => Ok(Self::AHash),
            'p' => Ok(Self::PHash),
            'd' => Ok(Self::DHash),
            other => Err(HashError::MalformedEncoding(format!(
                "unrecognized kind character {other:?}"
            ))),
        }
    }

    /// Byte written at the head of the binary form.
    pub fn code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::AHash => 1,
            Self::PHash => 2,
            Self::DHash => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| HashError::MalformedEncoding(format!("unrecognized kind code {code}")))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::AHash => write!(f, "average hash"),
            Self::PHash => write!(f, "perception hash"),
            Self::DHash => write!(f, "difference hash"),
        }
    }
}
