//! 24h sentiment assessment: pump/dump risk, market trend, next-period call.
//!
//! Independent of the Buy/Sell/Hold rule. Scores accumulate from fixed
//! contributions and are capped at 100:
//!
//! | condition                          | pump | dump |
//! |------------------------------------|------|------|
//! | RSI > 70 / RSI < 30                | +30  | +30  |
//! | MACD line > signal / < signal      | +20  | +20  |
//! | 24h change > +10% / < -10%         | +25  | +25  |
//! | Bollinger bandwidth > 15%          | +15  | +15  |
//! | volume > 1e9 with change > 0 / < 0 | +10  | +10  |
//!
//! The sentiment score sums +/-1 votes from RSI (60/40), MACD line sign,
//! trend class (strong trends vote twice), and 24h change (+/-2%).
//!
//! The bandwidth threshold is fixed here and does not follow the configurable
//! volatility classification used by the decision engine.

use serde::{Deserialize, Serialize};

use crate::bundle::IndicatorBundle;
use crate::decision::{RSI_OVERBOUGHT, RSI_OVERSOLD};
use crate::domain::MarketContext;

const MAX_RISK: u32 = 100;
const HIGH_VOLUME: f64 = 1e9;
const BIG_MOVE_PCT: f64 = 10.0;
const SMALL_MOVE_PCT: f64 = 2.0;
const RSI_BULLISH: f64 = 60.0;
const RSI_BEARISH: f64 = 40.0;
const SHOCK_VOLATILITY_PCT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    VeryBullish,
    Bullish,
    Neutral,
    Bearish,
    VeryBearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
    Sideways,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionConfidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub direction: Direction,
    pub confidence: PredictionConfidence,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAssessment {
    pub sentiment: SentimentLabel,
    /// 0-100.
    pub pump_risk: f64,
    /// 0-100.
    pub dump_risk: f64,
    pub trend: MarketTrend,
    pub prediction: Prediction,
}

/// Assess sentiment from the bundle and the 24h context.
pub fn assess(bundle: &IndicatorBundle, context: &MarketContext) -> SentimentAssessment {
    let (pump_risk, dump_risk) = shock_risk(bundle, context);
    let (score, reasons) = sentiment_score(bundle, context);

    SentimentAssessment {
        sentiment: label(score),
        pump_risk: f64::from(pump_risk),
        dump_risk: f64::from(dump_risk),
        trend: if bundle.macd.line >= 0.0 {
            MarketTrend::Bullish
        } else {
            MarketTrend::Bearish
        },
        prediction: Prediction {
            direction: direction(score),
            confidence: confidence(score),
            reason: if reasons.is_empty() {
                "no directional signals".to_string()
            } else {
                reasons.join("; ")
            },
        },
    }
}

fn shock_risk(bundle: &IndicatorBundle, ctx: &MarketContext) -> (u32, u32) {
    let mut pump = 0;
    let mut dump = 0;

    if bundle.rsi > RSI_OVERBOUGHT {
        pump += 30;
    } else if bundle.rsi < RSI_OVERSOLD {
        dump += 30;
    }

    if bundle.macd.line > bundle.macd.signal {
        pump += 20;
    } else if bundle.macd.line < bundle.macd.signal {
        dump += 20;
    }

    if ctx.price_change_24h > BIG_MOVE_PCT {
        pump += 25;
    } else if ctx.price_change_24h < -BIG_MOVE_PCT {
        dump += 25;
    }

    if bundle.volatility.percent > SHOCK_VOLATILITY_PCT {
        pump += 15;
        dump += 15;
    }

    if ctx.volume > HIGH_VOLUME {
        if ctx.price_change_24h > 0.0 {
            pump += 10;
        } else if ctx.price_change_24h < 0.0 {
            dump += 10;
        }
    }

    (pump.min(MAX_RISK), dump.min(MAX_RISK))
}

fn sentiment_score(bundle: &IndicatorBundle, ctx: &MarketContext) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if bundle.rsi > RSI_BULLISH {
        score += 1;
        reasons.push(format!("RSI {:.1} shows buying momentum", bundle.rsi));
    } else if bundle.rsi < RSI_BEARISH {
        score -= 1;
        reasons.push(format!("RSI {:.1} shows selling pressure", bundle.rsi));
    }

    if bundle.macd.line > 0.0 {
        score += 1;
        reasons.push("MACD above zero".to_string());
    } else if bundle.macd.line < 0.0 {
        score -= 1;
        reasons.push("MACD below zero".to_string());
    }

    let trend = bundle.trend;
    let weight = if trend.is_strong() { 2 } else { 1 };
    if trend.is_up() {
        score += weight;
        reasons.push(format!("{trend}"));
    } else if trend.is_down() {
        score -= weight;
        reasons.push(format!("{trend}"));
    }

    if ctx.price_change_24h > SMALL_MOVE_PCT {
        score += 1;
        reasons.push(format!("24h change {:+.1}%", ctx.price_change_24h));
    } else if ctx.price_change_24h < -SMALL_MOVE_PCT {
        score -= 1;
        reasons.push(format!("24h change {:+.1}%", ctx.price_change_24h));
    }

    (score, reasons)
}

fn label(score: i32) -> SentimentLabel {
    match score {
        s if s >= 3 => SentimentLabel::VeryBullish,
        s if s >= 1 => SentimentLabel::Bullish,
        0 => SentimentLabel::Neutral,
        s if s > -3 => SentimentLabel::Bearish,
        _ => SentimentLabel::VeryBearish,
    }
}

fn direction(score: i32) -> Direction {
    match score {
        s if s >= 2 => Direction::Up,
        s if s <= -2 => Direction::Down,
        _ => Direction::Sideways,
    }
}

fn confidence(score: i32) -> PredictionConfidence {
    match score.abs() {
        s if s >= 4 => PredictionConfidence::High,
        s if s >= 2 => PredictionConfidence::Medium,
        _ => PredictionConfidence::Low,
    }
}
