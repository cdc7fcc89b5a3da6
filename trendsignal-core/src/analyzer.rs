//! Analyzer: the thin orchestrator over bundle, decision, and sentiment.
//!
//! Holds only the validated configuration; every `analyze` call recomputes
//! from the supplied series. Safe to share across threads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bundle::{IndicatorBundle, IndicatorSet};
use crate::config::{AnalysisConfig, DecisionVariant};
use crate::decision::{DecisionEngine, TradePlan};
use crate::domain::{MarketContext, MarketInput};
use crate::error::AnalysisError;
use crate::sentiment::{self, SentimentAssessment};
use crate::window::last_or_default;

/// Indicator bundle merged with the trade plan (and sentiment, when the
/// extended variant runs). Serializes to one flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub indicators: IndicatorBundle,
    #[serde(flatten)]
    pub plan: TradePlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentAssessment>,
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    indicators: IndicatorSet,
    engine: DecisionEngine,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let indicators = IndicatorSet::from_config(&config)?;
        let engine = DecisionEngine::new(config.decision);
        Ok(Self {
            config,
            indicators,
            engine,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, input: &MarketInput) -> Result<AnalysisResult, AnalysisError> {
        input.validate()?;
        if input.prices.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        let indicators = self.indicators.compute(input);
        let extended = self.config.decision == DecisionVariant::Extended;

        let price = match (&input.context, extended) {
            (Some(ctx), true) => ctx.current_price,
            _ => last_or_default(&input.prices, 0.0),
        };
        let plan = self.engine.decide(&indicators, price);

        let sentiment = extended.then(|| {
            let context = input.context.unwrap_or(MarketContext {
                current_price: price,
                price_change_24h: 0.0,
                volume: 0.0,
            });
            sentiment::assess(&indicators, &context)
        });

        debug!(
            len = input.prices.len(),
            price,
            rsi = indicators.rsi,
            decision = %plan.decision,
            confidence = plan.confidence,
            "analysis complete"
        );

        Ok(AnalysisResult {
            indicators,
            plan,
            sentiment,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            indicators: IndicatorSet::from_config(&config).expect("classic preset must validate"),
            engine: DecisionEngine::new(config.decision),
            config,
        }
    }
}
