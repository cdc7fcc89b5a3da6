//! Input records handed to the engine by the data collaborator.
//!
//! Prices are chronological (oldest first); the last element is the current
//! price. Parallel series are optional. A volume or OHLC series whose length
//! does not line up is not an error: the volume-weighted indicators fall
//! back to price-only behaviour for it.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Parallel High/Low/Close arrays for the typical-price VWAP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl Ohlc {
    /// Typical price `(H + L + C) / 3` per index, or `None` when the three
    /// arrays differ in length.
    pub fn typical_prices(&self) -> Option<Vec<f64>> {
        if self.high.len() != self.low.len() || self.low.len() != self.close.len() {
            return None;
        }
        Some(
            self.high
                .iter()
                .zip(&self.low)
                .zip(&self.close)
                .map(|((h, l), c)| typical_price(*h, *l, *c))
                .collect(),
        )
    }

    /// Number of close values.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// True when there are no close values.
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

/// `(h + l + c) / 3`, dividing first when the sum would overflow.
fn typical_price(h: f64, l: f64, c: f64) -> f64 {
    let sum = h + l + c;
    if sum.is_finite() {
        sum / 3.0
    } else {
        h / 3.0 + l / 3.0 + c / 3.0
    }
}

/// 24h market context used by the sentiment module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub current_price: f64,
    /// Percent, e.g. `12.5` for +12.5%.
    pub price_change_24h: f64,
    pub volume: f64,
}

/// Everything one analysis call consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketInput {
    pub prices: Vec<f64>,
    #[serde(default)]
    pub volumes: Vec<f64>,
    #[serde(default)]
    pub ohlc: Option<Ohlc>,
    #[serde(default)]
    pub context: Option<MarketContext>,
}

impl MarketInput {
    /// Creates an input with prices only: no volumes, OHLC, or context.
    pub fn from_prices(prices: Vec<f64>) -> Self {
        Self {
            prices,
            ..Self::default()
        }
    }

    /// Sets the volume series, parallel to `prices`.
    pub fn with_volumes(mut self, volumes: Vec<f64>) -> Self {
        self.volumes = volumes;
        self
    }

    /// Attaches High/Low/Close arrays for the typical-price VWAP.
    pub fn with_ohlc(mut self, ohlc: Ohlc) -> Self {
        self.ohlc = Some(ohlc);
        self
    }

    /// Attaches the 24h context used by the extended variant.
    pub fn with_context(mut self, context: MarketContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Reject values the fallbacks cannot make sense of: NaN, infinities,
    /// and negative prices or volumes. Length mismatches are left to the
    /// indicators.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        check_non_negative("prices", &self.prices)?;
        check_non_negative("volumes", &self.volumes)?;
        if let Some(ohlc) = &self.ohlc {
            check_non_negative("high", &ohlc.high)?;
            check_non_negative("low", &ohlc.low)?;
            check_non_negative("close", &ohlc.close)?;
        }
        if let Some(ctx) = &self.context {
            check_non_negative("current_price", &[ctx.current_price])?;
            check_non_negative("volume", &[ctx.volume])?;
            if !ctx.price_change_24h.is_finite() {
                return Err(AnalysisError::InvalidInput {
                    field: "price_change_24h",
                    index: 0,
                    value: ctx.price_change_24h,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }
}

fn check_non_negative(field: &'static str, values: &[f64]) -> Result<(), AnalysisError> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(AnalysisError::InvalidInput {
                field,
                index,
                value,
                reason: "must be finite",
            });
        }
        if value < 0.0 {
            return Err(AnalysisError::InvalidInput {
                field,
                index,
                value,
                reason: "must be non-negative",
            });
        }
    }
    Ok(())
}
