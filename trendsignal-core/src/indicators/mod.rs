//! Concrete indicator implementations.
//!
//! Every indicator is a pure function of the supplied series: no state is
//! kept between calls, and a series shorter than `lookback()` produces the
//! documented fallback value instead of an error. Parameters are validated
//! once, in the constructor.
//!
//! VWAP is the exception to the single-series shape and exposes its own
//! two-argument `compute`.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stoch_rsi;
pub mod support_resistance;
pub mod trend;
pub mod vwap;

pub use bollinger::{Bollinger, BollingerBands};
pub use ema::Ema;
pub use macd::{Macd, MacdSignalMode, MacdValue};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stoch_rsi::StochRsi;
pub use support_resistance::{SupportResistance, SupportResistanceLevels};
pub use trend::{TrendClass, TrendClassifier, Volatility, VolatilityLevel, VolatilityThresholds};
pub use vwap::Vwap;

/// Trait for single-series indicators.
///
/// `compute` returns the reading at the most recent point of `prices`.
/// Implementations must be deterministic: equal inputs give bit-identical
/// outputs.
pub trait Indicator: Send + Sync {
    type Output;

    /// Human-readable name (e.g., "sma_14", "rsi_14").
    fn name(&self) -> &str;

    /// Minimum series length for a non-fallback reading.
    fn lookback(&self) -> usize;

    fn compute(&self, prices: &[f64]) -> Self::Output;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
