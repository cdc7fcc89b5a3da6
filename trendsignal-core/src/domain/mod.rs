//! Domain types: the input record and its parallel series.

pub mod series;

pub use series::{MarketContext, MarketInput, Ohlc};
