//! Stochastic RSI: where the latest RSI sits inside its recent range.
//!
//! Input is a trailing sequence of RSI values, not prices (see `Rsi::history`).
//! StochRSI = (rsi_last - min) / (max - min) * 100 over the last `period` values.
//! Lookback: period.
//! Edge cases: fewer than `period` values → 50 (neutral);
//! max == min → 0 (flat RSI, deliberately distinct from the neutral 50).

use super::Indicator;
use crate::error::AnalysisError;
use crate::window::{min_max, require_min_length, trailing};

pub const STOCH_RSI_NEUTRAL: f64 = 50.0;
pub const STOCH_RSI_FLAT: f64 = 0.0;

#[derive(Debug, Clone)]
pub struct StochRsi {
    period: usize,
    name: String,
}

impl StochRsi {
    /// Creates a Stochastic RSI over the last `period` RSI readings.
    pub fn new(period: usize) -> Result<Self, AnalysisError> {
        if period == 0 {
            return Err(AnalysisError::zero_period("stoch_rsi"));
        }
        Ok(Self {
            period,
            name: format!("stoch_rsi_{period}"),
        })
    }

    /// Number of RSI readings in the range window.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for StochRsi {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, rsi_history: &[f64]) -> f64 {
        if !require_min_length(rsi_history, self.period) {
            return STOCH_RSI_NEUTRAL;
        }
        let window = trailing(rsi_history, self.period);
        let (lo, hi) = min_max(window);
        if hi == lo {
            return STOCH_RSI_FLAT;
        }
        let last = window[window.len() - 1];
        ((last - lo) / (hi - lo) * 100.0).clamp(0.0, 100.0)
    }
}
