//! Errors surfaced by the engine.
//!
//! Indicator math never fails: short, empty, and degenerate inputs have
//! documented fallbacks. Only malformed input and invalid parameters are
//! reported, and they are reported before any computation starts.

use thiserror::Error;

/// Errors that can occur when constructing indicators or validating input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid input: {field}[{index}] = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        index: usize,
        value: f64,
        reason: &'static str,
    },
    #[error("invalid parameter for {indicator}: {reason}")]
    InvalidPeriod {
        indicator: &'static str,
        reason: String,
    },
    #[error("price series is empty")]
    EmptySeries,
}

impl AnalysisError {
    pub(crate) fn zero_period(indicator: &'static str) -> Self {
        Self::InvalidPeriod {
            indicator,
            reason: "period must be >= 1".into(),
        }
    }
}
