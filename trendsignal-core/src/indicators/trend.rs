//! Trend and volatility classification.
//!
//! Trend compares three simple means (short/medium/long, 5/10/20 by default):
//! short > medium > long → STRONG_UPTREND, short > medium → UPTREND,
//! short < medium < long → STRONG_DOWNTREND, short < medium → DOWNTREND,
//! otherwise SIDEWAYS. The SMA fallback applies, so a series shorter than
//! `short` is always SIDEWAYS.
//!
//! Volatility is the Bollinger band width as a percentage of the middle band.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::bollinger::BollingerBands;
use super::sma::Sma;
use super::Indicator;
use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendClass {
    StrongUptrend,
    Uptrend,
    Sideways,
    Downtrend,
    StrongDowntrend,
}

impl TrendClass {
    pub fn is_up(self) -> bool {
        matches!(self, Self::StrongUptrend | Self::Uptrend)
    }

    pub fn is_down(self) -> bool {
        matches!(self, Self::StrongDowntrend | Self::Downtrend)
    }

    pub fn is_strong(self) -> bool {
        matches!(self, Self::StrongUptrend | Self::StrongDowntrend)
    }
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StrongUptrend => "STRONG_UPTREND",
            Self::Uptrend => "UPTREND",
            Self::Sideways => "SIDEWAYS",
            Self::Downtrend => "DOWNTREND",
            Self::StrongDowntrend => "STRONG_DOWNTREND",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct TrendClassifier {
    short: Sma,
    medium: Sma,
    long: Sma,
}

impl TrendClassifier {
    /// Creates a classifier over three SMA windows. They must be strictly
    /// increasing.
    pub fn new(short: usize, medium: usize, long: usize) -> Result<Self, AnalysisError> {
        if !(short < medium && medium < long) {
            return Err(AnalysisError::InvalidPeriod {
                indicator: "trend",
                reason: format!("windows must be increasing, got {short}/{medium}/{long}"),
            });
        }
        Ok(Self {
            short: Sma::new(short)?,
            medium: Sma::new(medium)?,
            long: Sma::new(long)?,
        })
    }
}

impl Indicator for TrendClassifier {
    type Output = TrendClass;

    fn name(&self) -> &str {
        "trend"
    }

    fn lookback(&self) -> usize {
        self.long.lookback()
    }

    fn compute(&self, prices: &[f64]) -> TrendClass {
        let short = self.short.compute(prices);
        let medium = self.medium.compute(prices);
        let long = self.long.compute(prices);

        if short > medium && medium > long {
            TrendClass::StrongUptrend
        } else if short > medium {
            TrendClass::Uptrend
        } else if short < medium && medium < long {
            TrendClass::StrongDowntrend
        } else if short < medium {
            TrendClass::Downtrend
        } else {
            TrendClass::Sideways
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

/// Volatility reading: band width percent and its class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volatility {
    pub percent: f64,
    pub level: VolatilityLevel,
}

/// Band-width percentages separating LOW / MEDIUM / HIGH.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityThresholds {
    pub low_pct: f64,
    pub high_pct: f64,
}

impl Default for VolatilityThresholds {
    fn default() -> Self {
        Self {
            low_pct: 5.0,
            high_pct: 15.0,
        }
    }
}

impl VolatilityThresholds {
    /// Thresholds must be finite, non-negative, and `low_pct <= high_pct`.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let ok = self.low_pct.is_finite()
            && self.high_pct.is_finite()
            && self.low_pct >= 0.0
            && self.low_pct <= self.high_pct;
        if ok {
            Ok(())
        } else {
            Err(AnalysisError::InvalidPeriod {
                indicator: "volatility",
                reason: format!(
                    "thresholds must satisfy 0 <= low ({}) <= high ({})",
                    self.low_pct, self.high_pct
                ),
            })
        }
    }

    /// Classifies the bandwidth percentage of `bands`.
    pub fn classify(&self, bands: &BollingerBands) -> Volatility {
        let percent = bands.width_pct();
        let level = if percent > self.high_pct {
            VolatilityLevel::High
        } else if percent < self.low_pct {
            VolatilityLevel::Low
        } else {
            VolatilityLevel::Medium
        };
        Volatility { percent, level }
    }
}
