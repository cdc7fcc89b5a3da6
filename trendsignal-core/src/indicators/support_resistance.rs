//! Support/Resistance: trailing-window floor and ceiling.
//!
//! Single tier: support = min(last `window`), resistance = max(last `window`).
//! Tiered: with range = high - low,
//!   support_1 = low + 0.2 * range, support_2 = low,
//!   resistance_1 = high - 0.2 * range, resistance_2 = high.
//! Lookback: window.
//! Fallback: fewer than `window` prices → single tier collapses to the last
//! price; tiered uses fixed offsets of -5% / -10% and +5% / +10%.

use serde::{Deserialize, Serialize};

use super::Indicator;
use crate::error::AnalysisError;
use crate::window::{last_or_default, min_max, require_min_length, trailing};

const TIER_FRACTION: f64 = 0.2;

/// Support/resistance levels, single or two-tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportResistanceLevels {
    Tiered {
        support_1: f64,
        support_2: f64,
        resistance_1: f64,
        resistance_2: f64,
    },
    Single {
        support: f64,
        resistance: f64,
    },
}

impl SupportResistanceLevels {
    /// Nearest support level.
    pub fn support(&self) -> f64 {
        match *self {
            Self::Single { support, .. } => support,
            Self::Tiered { support_1, .. } => support_1,
        }
    }

    /// Nearest resistance level.
    pub fn resistance(&self) -> f64 {
        match *self {
            Self::Single { resistance, .. } => resistance,
            Self::Tiered { resistance_1, .. } => resistance_1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SupportResistance {
    window: usize,
    tiered: bool,
    name: String,
}

impl SupportResistance {
    /// Creates levels over the trailing `window` prices, two-tier when
    /// `tiered` is set.
    pub fn new(window: usize, tiered: bool) -> Result<Self, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::zero_period("support_resistance"));
        }
        Ok(Self {
            window,
            tiered,
            name: format!("support_resistance_{window}"),
        })
    }
}

impl Indicator for SupportResistance {
    type Output = SupportResistanceLevels;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, prices: &[f64]) -> SupportResistanceLevels {
        if !require_min_length(prices, self.window) {
            let price = last_or_default(prices, 0.0);
            return if self.tiered {
                SupportResistanceLevels::Tiered {
                    support_1: price * 0.95,
                    support_2: price * 0.90,
                    resistance_1: price * 1.05,
                    resistance_2: price * 1.10,
                }
            } else {
                SupportResistanceLevels::Single {
                    support: price,
                    resistance: price,
                }
            };
        }

        let (low, high) = min_max(trailing(prices, self.window));
        if self.tiered {
            let range = high - low;
            SupportResistanceLevels::Tiered {
                support_1: low + TIER_FRACTION * range,
                support_2: low,
                resistance_1: high - TIER_FRACTION * range,
                resistance_2: high,
            }
        } else {
            SupportResistanceLevels::Single {
                support: low,
                resistance: high,
            }
        }
    }
}
