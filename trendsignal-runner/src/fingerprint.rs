//! Content-addressed fingerprint of one analysis request.
//!
//! Two requests with the same configuration and bit-identical series share a
//! fingerprint, so their results are interchangeable.

use serde::{Deserialize, Serialize};
use std::fmt;

use trendsignal_core::{AnalysisConfig, MarketInput};

/// BLAKE3 hex digest over the configuration and every input value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Digest of the configuration alone, computed once per runner.
    pub fn config_digest(config: &AnalysisConfig) -> blake3::Hash {
        let json = serde_json::to_string(config).expect("AnalysisConfig serialization failed");
        blake3::hash(json.as_bytes())
    }

    pub fn new(config_digest: &blake3::Hash, input: &MarketInput) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(config_digest.as_bytes());

        hash_series(&mut hasher, b"prices", &input.prices);
        hash_series(&mut hasher, b"volumes", &input.volumes);

        match &input.ohlc {
            Some(ohlc) => {
                hasher.update(&[1]);
                hash_series(&mut hasher, b"high", &ohlc.high);
                hash_series(&mut hasher, b"low", &ohlc.low);
                hash_series(&mut hasher, b"close", &ohlc.close);
            }
            None => {
                hasher.update(&[0]);
            }
        }

        match &input.context {
            Some(ctx) => {
                hasher.update(&[1]);
                hasher.update(&ctx.current_price.to_le_bytes());
                hasher.update(&ctx.price_change_24h.to_le_bytes());
                hasher.update(&ctx.volume.to_le_bytes());
            }
            None => {
                hasher.update(&[0]);
            }
        }

        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Length-prefixed so adjacent series cannot alias each other.
fn hash_series(hasher: &mut blake3::Hasher, tag: &[u8], values: &[f64]) {
    hasher.update(tag);
    hasher.update(&(values.len() as u64).to_le_bytes());
    for v in values {
        hasher.update(&v.to_le_bytes());
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
