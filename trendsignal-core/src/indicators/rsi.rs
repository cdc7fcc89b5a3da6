//! Relative Strength Index (RSI).
//!
//! Simple (not Wilder-smoothed) averages over the last `period` differences:
//! avg_gain = sum(positive diffs) / period, avg_loss = sum(|negative diffs|) / period.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period + 1.
//! Edge cases: fewer than period + 1 prices → 50; avg_loss == 0 → 100, which
//! includes a perfectly flat series (avg_gain == 0 as well).
//! Differences are taken on the window divided by its magnitude scale, so
//! the sums stay finite for prices near `f64::MAX`; the gain/loss ratio is
//! unaffected.

use super::Indicator;
use crate::error::AnalysisError;
use crate::window::{magnitude_scale, require_min_length, trailing};

/// Neutral value returned when the series is too short.
pub const RSI_NEUTRAL: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    /// Creates an RSI over the last `period` differences. Fails on a zero period.
    pub fn new(period: usize) -> Result<Self, AnalysisError> {
        if period == 0 {
            return Err(AnalysisError::zero_period("rsi"));
        }
        Ok(Self {
            period,
            name: format!("rsi_{period}"),
        })
    }

    /// Number of differences averaged.
    pub fn period(&self) -> usize {
        self.period
    }

    /// RSI evaluated on every prefix of `prices` long enough to produce a
    /// non-fallback value, keeping only the trailing `count` results.
    /// Oldest first. This is the input Stochastic RSI expects.
    pub fn history(&self, prices: &[f64], count: usize) -> Vec<f64> {
        let first_end = self.lookback();
        if prices.len() < first_end || count == 0 {
            return Vec::new();
        }
        let start_end = (prices.len() + 1).saturating_sub(count).max(first_end);
        (start_end..=prices.len())
            .map(|end| self.compute(&prices[..end]))
            .collect()
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, prices: &[f64]) -> f64 {
        if !require_min_length(prices, self.lookback()) {
            return RSI_NEUTRAL;
        }

        let window = trailing(prices, self.lookback());
        let scale = magnitude_scale(window);
        let (gains, losses) = window
            .windows(2)
            .map(|w| w[1] / scale - w[0] / scale)
            .fold((0.0, 0.0), |(g, l), change| {
                if change > 0.0 {
                    (g + change, l)
                } else {
                    (g, l - change)
                }
            });

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;

        if avg_loss == 0.0 {
            return 100.0;
        }
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
