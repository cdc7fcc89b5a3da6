//! Moving Average Convergence/Divergence (MACD).
//!
//! line = EMA(prices, fast) - EMA(prices, slow)
//! histogram = line - signal
//!
//! Two signal-line modes:
//! - `Echo` (default): signal = EMA([line], signal_period). A one-element
//!   series is always below the EMA threshold, so the fallback returns the
//!   element: signal == line and histogram == 0 on every call. This is the
//!   historical output of the analyzer and is kept as-is.
//! - `Smoothed`: signal = EMA over the MACD line of every prefix of length
//!   >= slow. Falls back to echo while that history is shorter than
//!   signal_period.
//!
//! Lookback: slow.

use serde::{Deserialize, Serialize};

use super::ema::ema_of_series;
use super::Indicator;
use crate::error::AnalysisError;

/// How the signal line is derived from the MACD line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdSignalMode {
    #[default]
    Echo,
    Smoothed,
}

/// One MACD reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    mode: MacdSignalMode,
    name: String,
}

impl Macd {
    /// Creates a MACD from `fast` and `slow` EMA periods and a `signal`
    /// period. Periods must be non-zero with `fast < slow`.
    pub fn new(
        fast: usize,
        slow: usize,
        signal: usize,
        mode: MacdSignalMode,
    ) -> Result<Self, AnalysisError> {
        if fast == 0 || slow == 0 || signal == 0 {
            return Err(AnalysisError::zero_period("macd"));
        }
        if fast >= slow {
            return Err(AnalysisError::InvalidPeriod {
                indicator: "macd",
                reason: format!("fast period {fast} must be below slow period {slow}"),
            });
        }
        Ok(Self {
            fast,
            slow,
            signal,
            mode,
            name: format!("macd_{fast}_{slow}_{signal}"),
        })
    }

    /// The classic 12/26/9 configuration with the echo signal line.
    pub fn standard() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
            mode: MacdSignalMode::Echo,
            name: "macd_12_26_9".into(),
        }
    }

    fn line(&self, prices: &[f64]) -> f64 {
        ema_of_series(prices, self.fast) - ema_of_series(prices, self.slow)
    }

    fn signal_line(&self, prices: &[f64], line: f64) -> f64 {
        match self.mode {
            MacdSignalMode::Echo => ema_of_series(&[line], self.signal),
            MacdSignalMode::Smoothed => {
                if prices.len() < self.slow {
                    return line;
                }
                let history: Vec<f64> = (self.slow..=prices.len())
                    .map(|end| self.line(&prices[..end]))
                    .collect();
                ema_of_series(&history, self.signal)
            }
        }
    }
}

impl Indicator for Macd {
    type Output = MacdValue;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow
    }

    fn compute(&self, prices: &[f64]) -> MacdValue {
        let line = self.line(prices);
        let signal = self.signal_line(prices, line);
        MacdValue {
            line,
            signal,
            histogram: line - signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn zigzag(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.3)
            .collect()
    }

    #[test]
    fn echo_signal_equals_line() {
        let macd = Macd::standard();
        for n in [0, 1, 10, 26, 60] {
            let v = macd.compute(&zigzag(n));
            assert_eq!(v.signal, v.line, "n = {n}");
            assert_eq!(v.histogram, 0.0, "n = {n}");
        }
    }

    #[test]
    fn line_is_difference_of_emas() {
        let prices = zigzag(40);
        let macd = Macd::standard();
        let expected = ema_of_series(&prices, 12) - ema_of_series(&prices, 26);
        assert_approx(macd.compute(&prices).line, expected, DEFAULT_EPSILON);
    }

    #[test]
    fn short_series_line_is_zero() {
        // Both EMAs fall back to the last price.
        let v = Macd::standard().compute(&[10.0, 11.0, 12.0]);
        assert_eq!(v.line, 0.0);
    }

    #[test]
    fn rising_series_has_positive_line() {
        let prices: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        assert!(Macd::standard().compute(&prices).line > 0.0);
    }

    #[test]
    fn smoothed_signal_lags_line() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + (i * i) as f64 * 0.05).collect();
        let macd = Macd::new(12, 26, 9, MacdSignalMode::Smoothed).unwrap();
        let v = macd.compute(&prices);
        // Accelerating rise: the line keeps growing, so the smoothed signal trails it.
        assert!(v.signal < v.line);
        assert!(v.histogram > 0.0);
    }

    #[test]
    fn smoothed_signal_echoes_until_history_is_long_enough() {
        let prices = zigzag(30); // 5 MACD values, fewer than 9
        let macd = Macd::new(12, 26, 9, MacdSignalMode::Smoothed).unwrap();
        let v = macd.compute(&prices);
        assert_eq!(v.signal, v.line);
    }

    #[test]
    fn fast_must_be_below_slow() {
        assert!(Macd::new(26, 12, 9, MacdSignalMode::Echo).is_err());
        assert!(Macd::new(12, 12, 9, MacdSignalMode::Echo).is_err());
        assert!(Macd::new(0, 26, 9, MacdSignalMode::Echo).is_err());
    }

    #[test]
    fn signal_mode_tokens() {
        assert_eq!(
            serde_json::to_string(&MacdSignalMode::Smoothed).unwrap(),
            "\"smoothed\""
        );
    }
}
