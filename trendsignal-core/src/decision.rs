//! Decision engine: Buy/Sell/Hold with confidence, risk, and price levels.
//!
//! Base rule (every variant):
//!   Buy  iff rsi < 30 and price < bollinger.lower
//!   Sell iff rsi > 70 and price > bollinger.upper
//!   Hold otherwise. Both comparisons are strict.
//!
//! Levels:
//!   Hold → entry = price, stoploss = price * 0.99, take_profit = price * 0.98
//!   Buy  → stoploss = lower * 0.99, take_profit = middle
//!   Sell → stoploss = upper * 1.01, take_profit = middle
//!
//! The scored variant accumulates a 0-10 strength (RSI extreme +3, MACD
//! +2 aligned / +1 otherwise, trend alignment +2, HIGH volatility -1) and
//! suppresses a signal to Hold when the trend contradicts it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bundle::IndicatorBundle;
use crate::config::DecisionVariant;
use crate::indicators::{BollingerBands, VolatilityLevel};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

const SIGNAL_CONFIDENCE: f64 = 75.0;
const HOLD_CONFIDENCE: f64 = 50.0;
const MAX_SCORED_CONFIDENCE: f64 = 95.0;
const MAX_STRENGTH: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::Buy => "Buy",
            Decision::Sell => "Sell",
            Decision::Hold => "Hold",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// The trade recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub decision: Decision,
    /// 0-100.
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub entry_price: f64,
    pub stoploss: f64,
    pub take_profit: f64,
    /// 0-10 signal strength; scored and extended variants only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<u8>,
}

/// The base rule, shared by every variant.
pub fn base_decision(rsi: f64, price: f64, bands: &BollingerBands) -> Decision {
    if rsi < RSI_OVERSOLD && price < bands.lower {
        Decision::Buy
    } else if rsi > RSI_OVERBOUGHT && price > bands.upper {
        Decision::Sell
    } else {
        Decision::Hold
    }
}

/// Entry, stoploss and take-profit for a decision.
pub fn price_levels(decision: Decision, price: f64, bands: &BollingerBands) -> (f64, f64, f64) {
    match decision {
        Decision::Buy => (price, bands.lower * 0.99, bands.middle),
        Decision::Sell => (price, bands.upper * 1.01, bands.middle),
        Decision::Hold => (price, price * 0.99, price * 0.98),
    }
}

/// Stateless classifier over an `IndicatorBundle`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine {
    variant: DecisionVariant,
}

impl DecisionEngine {
    pub fn new(variant: DecisionVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> DecisionVariant {
        self.variant
    }

    pub fn decide(&self, bundle: &IndicatorBundle, price: f64) -> TradePlan {
        let base = base_decision(bundle.rsi, price, &bundle.bollinger_bands);
        match self.variant {
            DecisionVariant::Basic => {
                let confidence = if base == Decision::Hold {
                    HOLD_CONFIDENCE
                } else {
                    SIGNAL_CONFIDENCE
                };
                build_plan(base, confidence, base_risk(base), price, bundle, None)
            }
            DecisionVariant::Scored | DecisionVariant::Extended => {
                let (decision, strength) = score(base, bundle);
                let confidence =
                    (f64::from(strength) * 10.0 + 5.0).min(MAX_SCORED_CONFIDENCE);
                let risk = if bundle.volatility.level == VolatilityLevel::High {
                    RiskLevel::High
                } else {
                    base_risk(decision)
                };
                build_plan(decision, confidence, risk, price, bundle, Some(strength))
            }
        }
    }
}

fn base_risk(decision: Decision) -> RiskLevel {
    match decision {
        Decision::Hold => RiskLevel::Medium,
        Decision::Buy | Decision::Sell => RiskLevel::Low,
    }
}

fn build_plan(
    decision: Decision,
    confidence: f64,
    risk_level: RiskLevel,
    price: f64,
    bundle: &IndicatorBundle,
    strength: Option<u8>,
) -> TradePlan {
    let (entry_price, stoploss, take_profit) =
        price_levels(decision, price, &bundle.bollinger_bands);
    TradePlan {
        decision,
        confidence,
        risk_level,
        entry_price,
        stoploss,
        take_profit,
        strength,
    }
}

/// Signal strength and the (possibly suppressed) decision.
fn score(base: Decision, bundle: &IndicatorBundle) -> (Decision, u8) {
    let mut strength: i32 = 0;
    let mut decision = base;

    if bundle.rsi < RSI_OVERSOLD || bundle.rsi > RSI_OVERBOUGHT {
        strength += 3;
    }

    let histogram = bundle.macd.histogram;
    if histogram != 0.0 {
        let aligned = (histogram > 0.0 && base == Decision::Buy)
            || (histogram < 0.0 && base == Decision::Sell);
        strength += if aligned { 2 } else { 1 };
    }

    let trend = bundle.trend;
    match base {
        Decision::Buy if trend.is_up() => strength += 2,
        Decision::Sell if trend.is_down() => strength += 2,
        Decision::Buy if trend.is_down() => decision = Decision::Hold,
        Decision::Sell if trend.is_up() => decision = Decision::Hold,
        _ => {}
    }

    if bundle.volatility.level == VolatilityLevel::High {
        strength -= 1;
    }

    (decision, strength.clamp(0, i32::from(MAX_STRENGTH)) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{
        assert_approx, MacdValue, SupportResistanceLevels, TrendClass, Volatility, DEFAULT_EPSILON,
    };

    fn bundle(rsi: f64, bands: BollingerBands) -> IndicatorBundle {
        IndicatorBundle {
            sma: bands.middle,
            ema: bands.middle,
            rsi,
            stoch_rsi: 50.0,
            macd: MacdValue { line: 0.0, signal: 0.0, histogram: 0.0 },
            bollinger_bands: bands,
            vwap: bands.middle,
            support_resistance: SupportResistanceLevels::Single {
                support: bands.lower,
                resistance: bands.upper,
            },
            trend: TrendClass::Sideways,
            volatility: Volatility { percent: 8.0, level: VolatilityLevel::Medium },
        }
    }

    fn bands() -> BollingerBands {
        BollingerBands { upper: 110.0, middle: 100.0, lower: 90.0 }
    }

    #[test]
    fn buy_requires_both_conditions() {
        assert_eq!(base_decision(25.0, 89.0, &bands()), Decision::Buy);
        assert_eq!(base_decision(35.0, 89.0, &bands()), Decision::Hold);
        assert_eq!(base_decision(25.0, 91.0, &bands()), Decision::Hold);
    }

    #[test]
    fn sell_requires_both_conditions() {
        assert_eq!(base_decision(75.0, 111.0, &bands()), Decision::Sell);
        assert_eq!(base_decision(65.0, 111.0, &bands()), Decision::Hold);
        assert_eq!(base_decision(75.0, 109.0, &bands()), Decision::Hold);
    }

    #[test]
    fn band_equality_does_not_trigger() {
        assert_eq!(base_decision(10.0, 90.0, &bands()), Decision::Hold);
        assert_eq!(base_decision(90.0, 110.0, &bands()), Decision::Hold);
        assert_eq!(base_decision(30.0, 80.0, &bands()), Decision::Hold);
        assert_eq!(base_decision(70.0, 120.0, &bands()), Decision::Hold);
    }

    #[test]
    fn basic_buy_plan_uses_bands() {
        let plan = DecisionEngine::new(DecisionVariant::Basic).decide(&bundle(20.0, bands()), 85.0);
        assert_eq!(plan.decision, Decision::Buy);
        assert_eq!(plan.confidence, 75.0);
        assert_eq!(plan.risk_level, RiskLevel::Low);
        assert_eq!(plan.entry_price, 85.0);
        assert_approx(plan.stoploss, 89.1, DEFAULT_EPSILON);
        assert_eq!(plan.take_profit, 100.0);
        assert_eq!(plan.strength, None);
    }

    #[test]
    fn basic_sell_plan_uses_bands() {
        let plan = DecisionEngine::new(DecisionVariant::Basic).decide(&bundle(80.0, bands()), 115.0);
        assert_eq!(plan.decision, Decision::Sell);
        assert_approx(plan.stoploss, 111.1, 1e-9);
        assert_eq!(plan.take_profit, 100.0);
    }

    #[test]
    fn basic_hold_plan() {
        let plan = DecisionEngine::default().decide(&bundle(50.0, bands()), 100.0);
        assert_eq!(plan.decision, Decision::Hold);
        assert_eq!(plan.confidence, 50.0);
        assert_eq!(plan.risk_level, RiskLevel::Medium);
        assert_eq!(plan.stoploss, 99.0);
        assert_eq!(plan.take_profit, 98.0);
    }

    #[test]
    fn scored_buy_with_aligned_macd_and_trend() {
        let mut b = bundle(20.0, bands());
        b.macd = MacdValue { line: 1.0, signal: 0.5, histogram: 0.5 };
        b.trend = TrendClass::Uptrend;
        let plan = DecisionEngine::new(DecisionVariant::Scored).decide(&b, 85.0);
        assert_eq!(plan.decision, Decision::Buy);
        // 3 (RSI) + 2 (MACD aligned) + 2 (trend) = 7
        assert_eq!(plan.strength, Some(7));
        assert_eq!(plan.confidence, 75.0);
    }

    #[test]
    fn scored_buy_with_opposing_macd() {
        let mut b = bundle(20.0, bands());
        b.macd = MacdValue { line: -1.0, signal: -0.5, histogram: -0.5 };
        let plan = DecisionEngine::new(DecisionVariant::Scored).decide(&b, 85.0);
        // 3 (RSI) + 1 (MACD not aligned)
        assert_eq!(plan.strength, Some(4));
        assert_eq!(plan.confidence, 45.0);
    }

    #[test]
    fn scored_buy_suppressed_by_downtrend() {
        let mut b = bundle(20.0, bands());
        b.trend = TrendClass::StrongDowntrend;
        let plan = DecisionEngine::new(DecisionVariant::Scored).decide(&b, 85.0);
        assert_eq!(plan.decision, Decision::Hold);
        assert_eq!(plan.strength, Some(3));
        assert_eq!(plan.risk_level, RiskLevel::Medium);
        // Hold pricing, not band pricing.
        assert_approx(plan.stoploss, 85.0 * 0.99, DEFAULT_EPSILON);
        assert_approx(plan.take_profit, 85.0 * 0.98, DEFAULT_EPSILON);
    }

    #[test]
    fn scored_sell_suppressed_by_uptrend() {
        let mut b = bundle(80.0, bands());
        b.trend = TrendClass::Uptrend;
        let plan = DecisionEngine::new(DecisionVariant::Scored).decide(&b, 115.0);
        assert_eq!(plan.decision, Decision::Hold);
    }

    #[test]
    fn scored_high_volatility_penalty_and_risk() {
        let mut b = bundle(50.0, bands());
        b.volatility = Volatility { percent: 20.0, level: VolatilityLevel::High };
        let plan = DecisionEngine::new(DecisionVariant::Scored).decide(&b, 100.0);
        // 0 - 1 clamps to 0
        assert_eq!(plan.strength, Some(0));
        assert_eq!(plan.confidence, 5.0);
        assert_eq!(plan.risk_level, RiskLevel::High);
    }

    #[test]
    fn decision_tokens() {
        assert_eq!(serde_json::to_string(&Decision::Buy).unwrap(), "\"Buy\"");
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"Medium\"");
    }
}
