//! Indicator bundle: every indicator evaluated once over the same input.
//!
//! `IndicatorSet` holds the constructed (validated) indicators for a config;
//! `IndicatorBundle` holds their readings for one input. Indicators do not
//! depend on each other except Stochastic RSI, which consumes the RSI
//! history, and volatility, which reads the Bollinger bands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::domain::MarketInput;
use crate::error::AnalysisError;
use crate::indicators::{
    Bollinger, BollingerBands, Ema, Indicator, Macd, MacdValue, Rsi, Sma, StochRsi,
    SupportResistance, SupportResistanceLevels, TrendClass, TrendClassifier, Volatility,
    VolatilityThresholds, Vwap,
};

/// Indicators built from an `AnalysisConfig`.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    sma: Sma,
    ema: Ema,
    rsi: Rsi,
    stoch_rsi: StochRsi,
    macd: Macd,
    bollinger: Bollinger,
    vwap: Vwap,
    support_resistance: SupportResistance,
    trend: TrendClassifier,
    volatility: VolatilityThresholds,
}

impl IndicatorSet {
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        config.volatility.validate()?;
        Ok(Self {
            sma: Sma::new(config.sma.period)?,
            ema: Ema::new(config.ema.period)?,
            rsi: Rsi::new(config.rsi.period)?,
            stoch_rsi: StochRsi::new(config.stoch_rsi.period)?,
            macd: Macd::new(
                config.macd.fast,
                config.macd.slow,
                config.macd.signal,
                config.macd.signal_mode,
            )?,
            bollinger: Bollinger::new(config.bollinger.period, config.bollinger.width)?,
            vwap: Vwap,
            support_resistance: SupportResistance::new(
                config.support_resistance.window,
                config.support_resistance.tiered,
            )?,
            trend: TrendClassifier::new(config.trend.short, config.trend.medium, config.trend.long)?,
            volatility: config.volatility,
        })
    }

    /// Evaluate every indicator over `input`. Never fails: short or
    /// mismatched series produce each indicator's fallback.
    pub fn compute(&self, input: &MarketInput) -> IndicatorBundle {
        let prices = input.prices.as_slice();

        if prices.len() < self.bollinger.lookback() {
            debug!(
                len = prices.len(),
                required = self.bollinger.lookback(),
                "series shorter than Bollinger window, bands collapse to last price"
            );
        }

        let rsi_history = self.rsi.history(prices, self.stoch_rsi.period());
        let bollinger_bands = self.bollinger.compute(prices);
        let vwap = match &input.ohlc {
            Some(ohlc) if !ohlc.is_empty() => {
                self.vwap.compute_typical(prices, ohlc, &input.volumes)
            }
            _ => self.vwap.compute(prices, &input.volumes),
        };

        IndicatorBundle {
            sma: self.sma.compute(prices),
            ema: self.ema.compute(prices),
            rsi: self.rsi.compute(prices),
            stoch_rsi: self.stoch_rsi.compute(&rsi_history),
            macd: self.macd.compute(prices),
            bollinger_bands,
            vwap,
            support_resistance: self.support_resistance.compute(prices),
            trend: self.trend.compute(prices),
            volatility: self.volatility.classify(&bollinger_bands),
        }
    }
}

/// Readings of every indicator at the most recent point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    pub sma: f64,
    pub ema: f64,
    pub rsi: f64,
    pub stoch_rsi: f64,
    pub macd: MacdValue,
    pub bollinger_bands: BollingerBands,
    pub vwap: f64,
    pub support_resistance: SupportResistanceLevels,
    pub trend: TrendClass,
    pub volatility: Volatility,
}

impl IndicatorBundle {
    /// Compute a bundle directly from a config. Validates the config.
    pub fn compute(input: &MarketInput, config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        Ok(IndicatorSet::from_config(config)?.compute(input))
    }
}
