//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(prices, period)
//! - Upper: middle + width * stddev(last `period` prices)
//! - Lower: middle - width * stddev(last `period` prices)
//!
//! Uses population stddev (divide by N), computed on deviations divided by
//! the window's magnitude scale so that squaring cannot overflow.
//! Lookback: period.
//! Fallback: fewer than `period` prices → all three bands equal the last
//! price (0.0 when empty).

use serde::{Deserialize, Serialize};

use super::Indicator;
use crate::error::AnalysisError;
use crate::window::{last_or_default, magnitude_scale, mean, require_min_length, trailing};

/// The three bands. Always `lower <= middle <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    fn collapsed(price: f64) -> Self {
        Self {
            upper: price,
            middle: price,
            lower: price,
        }
    }

    /// Band width as a percentage of the middle band. 0 when middle is 0.
    pub fn width_pct(&self) -> f64 {
        if self.middle == 0.0 {
            0.0
        } else {
            (self.upper - self.lower) / self.middle * 100.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Bollinger {
    /// Creates bands `multiplier` standard deviations around a `period` SMA.
    /// Fails on a zero period or a width that is not positive and finite.
    pub fn new(period: usize, multiplier: f64) -> Result<Self, AnalysisError> {
        if period == 0 {
            return Err(AnalysisError::zero_period("bollinger"));
        }
        if !(multiplier > 0.0 && multiplier.is_finite()) {
            return Err(AnalysisError::InvalidPeriod {
                indicator: "bollinger",
                reason: format!("width {multiplier} must be positive and finite"),
            });
        }
        Ok(Self {
            period,
            multiplier,
            name: format!("bollinger_{period}_{multiplier}"),
        })
    }
}

impl Indicator for Bollinger {
    type Output = BollingerBands;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, prices: &[f64]) -> BollingerBands {
        if !require_min_length(prices, self.period) {
            return BollingerBands::collapsed(last_or_default(prices, 0.0));
        }

        let window = trailing(prices, self.period);
        let scale = magnitude_scale(window);
        let middle = mean(window);
        let scaled_middle = middle / scale;
        let variance = window
            .iter()
            .map(|p| {
                let diff = p / scale - scaled_middle;
                diff * diff
            })
            .sum::<f64>()
            / self.period as f64;
        let stddev = variance.sqrt() * scale;

        BollingerBands {
            upper: middle + self.multiplier * stddev,
            middle,
            lower: middle - self.multiplier * stddev,
        }
    }
}
