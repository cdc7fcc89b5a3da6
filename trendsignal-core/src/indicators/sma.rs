//! Simple Moving Average (SMA).
//!
//! Mean of the last `period` prices.
//! Lookback: period.
//! Fallback: fewer than `period` prices → last price (0.0 when empty).

use super::Indicator;
use crate::error::AnalysisError;
use crate::window::{last_or_default, mean, require_min_length, trailing};

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    /// Creates an SMA over the last `period` prices. Fails on a zero period.
    pub fn new(period: usize) -> Result<Self, AnalysisError> {
        if period == 0 {
            return Err(AnalysisError::zero_period("sma"));
        }
        Ok(Self {
            period,
            name: format!("sma_{period}"),
        })
    }

    /// Window length.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, prices: &[f64]) -> f64 {
        if !require_min_length(prices, self.period) {
            return last_or_default(prices, 0.0);
        }
        mean(trailing(prices, self.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_uses_trailing_window() {
        let sma = Sma::new(5).unwrap();
        // mean(12,13,14,15,16) = 14.0
        let v = sma.compute(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        assert_approx(v, 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_last_price() {
        let sma = Sma::new(1).unwrap();
        assert_approx(sma.compute(&[100.0, 200.0, 300.0]), 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_short_series_falls_back_to_last() {
        let sma = Sma::new(14).unwrap();
        assert_eq!(sma.compute(&[5.0]), 5.0);
        assert_eq!(sma.compute(&[3.0, 9.0]), 9.0);
    }

    #[test]
    fn sma_empty_series_is_zero() {
        assert_eq!(Sma::new(14).unwrap().compute(&[]), 0.0);
    }

    #[test]
    fn sma_zero_period_rejected() {
        assert!(matches!(
            Sma::new(0),
            Err(AnalysisError::InvalidPeriod { indicator: "sma", .. })
        ));
    }

    #[test]
    fn sma_name_and_lookback() {
        let sma = Sma::new(20).unwrap();
        assert_eq!(sma.name(), "sma_20");
        assert_eq!(sma.lookback(), 20);
    }
}
