//! Exponential Moving Average (EMA).
//!
//! Recursive: ema = (price - ema) * alpha + ema, alpha = 2 / (period + 1).
//! Seed: the FIRST element of the supplied series, then the recurrence runs
//! over every later element. The whole slice is smoothed, not just the last
//! `period` points, so callers pass exactly the window they mean.
//! Lookback: period.
//! Fallback: fewer than `period` values → last value (0.0 when empty).

use super::Indicator;
use crate::error::AnalysisError;
use crate::window::{last_or_default, require_min_length};

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    /// Creates an EMA with smoothing `2 / (period + 1)`. Fails on a zero period.
    pub fn new(period: usize) -> Result<Self, AnalysisError> {
        if period == 0 {
            return Err(AnalysisError::zero_period("ema"));
        }
        Ok(Self {
            period,
            name: format!("ema_{period}"),
        })
    }

    /// Smoothing period.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, prices: &[f64]) -> f64 {
        ema_of_series(prices, self.period)
    }
}

/// EMA of an arbitrary series with the fallback applied.
/// Used by MACD for both the price EMAs and the signal line.
pub(crate) fn ema_of_series(values: &[f64], period: usize) -> f64 {
    if !require_min_length(values, period) {
        return last_or_default(values, 0.0);
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut iter = values.iter();
    let Some(&seed) = iter.next() else {
        return 0.0;
    };
    iter.fold(seed, |ema, &v| (v - ema) * alpha + ema)
}
