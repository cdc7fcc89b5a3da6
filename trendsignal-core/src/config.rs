//! Analysis configuration and named presets.
//!
//! One record per indicator instead of one function per variant: the
//! presets differ only in which decision variant runs and whether
//! support/resistance is tiered. Every field has a default, so a partial
//! TOML/JSON document deserializes into the classic preset with overrides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;
use crate::indicators::{MacdSignalMode, VolatilityThresholds};

/// Single-period indicator parameters (SMA, EMA, RSI, Stochastic RSI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    pub period: usize,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    pub signal_mode: MacdSignalMode,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
            signal_mode: MacdSignalMode::Echo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    pub period: usize,
    pub width: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportResistanceConfig {
    pub window: usize,
    pub tiered: bool,
}

impl Default for SupportResistanceConfig {
    fn default() -> Self {
        Self {
            window: 20,
            tiered: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            short: 5,
            medium: 10,
            long: 20,
        }
    }
}

/// Which decision engine runs on top of the indicator bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionVariant {
    /// Base rule, fixed confidence 75 / 50.
    #[default]
    Basic,
    /// Base rule plus 0-10 signal strength and trend suppression.
    Scored,
    /// Scored, plus the 24h sentiment assessment.
    Extended,
}

/// Complete analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sma: PeriodConfig,
    pub ema: PeriodConfig,
    pub rsi: PeriodConfig,
    pub stoch_rsi: PeriodConfig,
    pub macd: MacdConfig,
    pub bollinger: BollingerConfig,
    pub support_resistance: SupportResistanceConfig,
    pub trend: TrendConfig,
    pub volatility: VolatilityThresholds,
    pub decision: DecisionVariant,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Preset::Classic.config()
    }
}

impl AnalysisConfig {
    /// Check every parameter by building the indicator set once.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        crate::bundle::IndicatorSet::from_config(self).map(|_| ())
    }
}

/// Named configuration presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Baseline: SMA/EMA/RSI 14, MACD 12/26/9, Bollinger 20x2,
    /// single-tier support/resistance, basic decision.
    #[default]
    Classic,
    /// Classic indicators with the scored decision engine.
    Scored,
    /// Scored decision, tiered support/resistance, sentiment assessment.
    Extended,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Scored, Preset::Extended];

    pub fn config(self) -> AnalysisConfig {
        let classic = AnalysisConfig {
            sma: PeriodConfig::default(),
            ema: PeriodConfig::default(),
            rsi: PeriodConfig::default(),
            stoch_rsi: PeriodConfig::default(),
            macd: MacdConfig::default(),
            bollinger: BollingerConfig::default(),
            support_resistance: SupportResistanceConfig::default(),
            trend: TrendConfig::default(),
            volatility: VolatilityThresholds::default(),
            decision: DecisionVariant::Basic,
        };
        match self {
            Preset::Classic => classic,
            Preset::Scored => AnalysisConfig {
                decision: DecisionVariant::Scored,
                ..classic
            },
            Preset::Extended => AnalysisConfig {
                decision: DecisionVariant::Extended,
                support_resistance: SupportResistanceConfig {
                    tiered: true,
                    ..classic.support_resistance
                },
                ..classic
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Scored => "scored",
            Preset::Extended => "extended",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset '{s}'"))
    }
}
