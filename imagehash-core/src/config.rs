//! Similarity thresholds.
//!
//! Handles loading the threshold from environment variables with a sensible default.

use tracing::warn;

/// Environment variable overriding [`SimilarityConfig::max_distance`].
pub const MAX_DISTANCE_ENV: &str = "IMAGEHASH_MAX_DISTANCE";

/// Maximum Hamming distance for two hashes to count as "similar".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityConfig {
    /// Allowed differing bits per 64 bits of hash (default: 10, ~15%)
    pub max_distance: u32,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self { max_distance: 10 }
    }
}

impl SimilarityConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let max_distance = match std::env::var(MAX_DISTANCE_ENV) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Ignoring invalid {MAX_DISTANCE_ENV}");
                Self::default().max_distance
            }),
            Err(_) => Self::default().max_distance,
        };

        Self { max_distance }
    }

    /// Threshold for a hash of `bits` bits, scaled linearly from the
    /// per-64-bit setting.
    pub fn threshold_for_bits(&self, bits: usize) -> u32 {
        let scaled = u64::from(self.max_distance) * bits as u64 / 64;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}
