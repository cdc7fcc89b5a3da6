//! Volume-Weighted Average Price (VWAP).
//!
//! VWAP = sum(price * volume) / sum(volume) over the full series.
//! The typical-price variant weights (H + L + C) / 3 instead of the close.
//!
//! Not an `Indicator`: it needs a second, parallel series.
//! Fallback: empty volumes, mismatched lengths, or zero total volume →
//! last price (0.0 when empty). The typical-price variant falls back the same
//! way, to the last element of `prices`.
//! Prices and volumes are divided by their magnitude scales before the
//! products are summed, so the sums stay finite for any finite input.

use tracing::debug;

use crate::domain::Ohlc;
use crate::window::{last_or_default, magnitude_scale};

#[derive(Debug, Clone, Copy, Default)]
pub struct Vwap;

impl Vwap {
    pub fn name(&self) -> &str {
        "vwap"
    }

    /// VWAP of `prices` weighted by `volumes`.
    pub fn compute(&self, prices: &[f64], volumes: &[f64]) -> f64 {
        weighted_mean(prices, volumes).unwrap_or_else(|| last_or_default(prices, 0.0))
    }

    /// VWAP over the typical prices of `ohlc`. Falls back to the last of
    /// `prices`, like [`Vwap::compute`].
    pub fn compute_typical(&self, prices: &[f64], ohlc: &Ohlc, volumes: &[f64]) -> f64 {
        let fallback = last_or_default(prices, 0.0);
        match ohlc.typical_prices() {
            Some(typical) => weighted_mean(&typical, volumes).unwrap_or(fallback),
            None => {
                debug!(
                    high = ohlc.high.len(),
                    low = ohlc.low.len(),
                    close = ohlc.close.len(),
                    "OHLC lengths differ, VWAP falls back to last price"
                );
                fallback
            }
        }
    }
}

fn weighted_mean(prices: &[f64], volumes: &[f64]) -> Option<f64> {
    if volumes.is_empty() || volumes.len() != prices.len() {
        if !volumes.is_empty() {
            debug!(
                prices = prices.len(),
                volumes = volumes.len(),
                "volume length mismatch, VWAP falls back to last price"
            );
        }
        return None;
    }
    let price_scale = magnitude_scale(prices);
    let volume_scale = magnitude_scale(volumes);
    let total_volume: f64 = volumes.iter().map(|v| v / volume_scale).sum();
    if total_volume == 0.0 {
        return None;
    }
    let weighted: f64 = prices
        .iter()
        .zip(volumes)
        .map(|(p, v)| (p / price_scale) * (v / volume_scale))
        .sum();
    Some(weighted / total_volume * price_scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn vwap_weights_by_volume() {
        // (10*1 + 20*3) / 4 = 17.5
        assert_approx(Vwap.compute(&[10.0, 20.0], &[1.0, 3.0]), 17.5, DEFAULT_EPSILON);
    }

    #[test]
    fn vwap_empty_volumes_falls_back() {
        assert_eq!(Vwap.compute(&[10.0, 20.0], &[]), 20.0);
    }

    #[test]
    fn vwap_zero_volume_falls_back() {
        assert_eq!(Vwap.compute(&[10.0, 20.0], &[0.0, 0.0]), 20.0);
    }

    #[test]
    fn vwap_mismatched_lengths_fall_back() {
        assert_eq!(Vwap.compute(&[10.0, 20.0, 30.0], &[1.0, 1.0]), 30.0);
    }

    #[test]
    fn vwap_empty_prices_is_zero() {
        assert_eq!(Vwap.compute(&[], &[]), 0.0);
    }

    #[test]
    fn vwap_typical_price() {
        let ohlc = Ohlc {
            high: vec![12.0, 24.0],
            low: vec![8.0, 18.0],
            close: vec![10.0, 21.0],
        };
        // typical = [10, 21]; (10*1 + 21*1) / 2 = 15.5
        assert_approx(
            Vwap.compute_typical(&[10.0, 21.0], &ohlc, &[1.0, 1.0]),
            15.5,
            DEFAULT_EPSILON,
        );
    }

    #[test]
    fn vwap_typical_mismatch_falls_back_to_last_price() {
        let ohlc = Ohlc {
            high: vec![12.0],
            low: vec![8.0, 18.0],
            close: vec![10.0, 21.0],
        };
        assert_eq!(Vwap.compute_typical(&[10.0, 20.5], &ohlc, &[1.0, 1.0]), 20.5);
    }

    #[test]
    fn vwap_typical_zero_volume_falls_back_to_last_price() {
        let ohlc = Ohlc {
            high: vec![12.0, 24.0],
            low: vec![8.0, 18.0],
            close: vec![10.0, 21.0],
        };
        assert_eq!(Vwap.compute_typical(&[10.0, 20.5], &ohlc, &[0.0, 0.0]), 20.5);
    }

    #[test]
    fn vwap_huge_prices_and_volumes_stay_finite() {
        let prices = [f64::MAX / 2.0, f64::MAX / 2.0];
        let volumes = [f64::MAX, f64::MAX];
        let v = Vwap.compute(&prices, &volumes);
        assert!(v.is_finite());
        assert_approx(v / (f64::MAX / 2.0), 1.0, 1e-12);
    }
}
