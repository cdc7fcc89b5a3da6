//! TrendSignal Core: indicators, trend classification, decision and sentiment.
//!
//! This crate is the pure computational engine:
//! - Input records and validation (prices, optional volumes/OHLC, 24h context)
//! - Windowing helpers shared by every indicator
//! - SMA, EMA, RSI, Stochastic RSI, MACD, Bollinger Bands, VWAP,
//!   support/resistance, trend and volatility classification
//! - Rule-based decision engine (basic and scored variants)
//! - 24h sentiment assessment (pump/dump risk, next-period prediction)
//! - `Analyzer`, which composes the above into one `AnalysisResult`
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod analyzer;
pub mod bundle;
pub mod config;
pub mod decision;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod sentiment;
pub mod window;

pub use analyzer::{AnalysisResult, Analyzer};
pub use bundle::{IndicatorBundle, IndicatorSet};
pub use config::{AnalysisConfig, DecisionVariant, Preset};
pub use decision::{Decision, DecisionEngine, RiskLevel, TradePlan};
pub use domain::{MarketContext, MarketInput, Ohlc};
pub use error::AnalysisError;
pub use sentiment::SentimentAssessment;
