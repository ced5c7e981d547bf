//! Construction-time settings for [`Graph`](crate::Graph).

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Default bucket count multiplier (buckets per initial node).
pub const DEFAULT_BUCKET_RATIO: f64 = 2.5;

/// Largest accepted bucket ratio. The table is allocated up front, so the
/// ratio bounds its memory relative to the node array.
pub const MAX_BUCKET_RATIO: f64 = 64.0;

/// Default modulus of the universal hash family.
pub const DEFAULT_HASH_PRIME: u64 = 1_000_000_009;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Identity index bucket count as a multiple of the initial node count.
    /// The table is sized once and never resized.
    pub bucket_ratio: f64,
    /// Prime modulus `p` of the hash family `((a·id + b) mod p) mod m`.
    pub hash_prime: u64,
    /// Fixed seed for the hash coefficients. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            bucket_ratio: DEFAULT_BUCKET_RATIO,
            hash_prime: DEFAULT_HASH_PRIME,
            seed: None,
        }
    }
}

impl GraphConfig {
    /// Default settings with a fixed hash seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a JSON object; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: GraphConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bucket_ratio.is_finite()
            || self.bucket_ratio <= 0.0
            || self.bucket_ratio > MAX_BUCKET_RATIO
        {
            return Err(GraphError::Config(format!(
                "bucket_ratio must be in (0, {}], got {}",
                MAX_BUCKET_RATIO, self.bucket_ratio
            )));
        }
        if self.hash_prime < 2 {
            return Err(GraphError::Config(format!(
                "hash_prime must be at least 2, got {}",
                self.hash_prime
            )));
        }
        Ok(())
    }

    /// Bucket count for a table holding `node_count` initial nodes.
    pub fn bucket_count(&self, node_count: usize) -> usize {
        ((node_count as f64 * self.bucket_ratio).ceil() as usize).max(1)
    }
}
