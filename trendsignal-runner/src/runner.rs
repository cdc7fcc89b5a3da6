//! Host entry point: a memoizing analyzer and the `run` call.

use std::path::Path;
use thiserror::Error;
use tracing::debug;

use trendsignal_core::{AnalysisError, AnalysisResult, Analyzer, MarketInput};

use crate::cache::{CacheStats, ResultCache};
use crate::config::{ConfigError, RunnerConfig};
use crate::fingerprint::Fingerprint;

/// Anything a host must report as "analysis unavailable".
#[derive(Debug, Error)]
pub enum RunError {
    #[error("analysis unavailable: {0}")]
    Config(#[from] ConfigError),
    #[error("analysis unavailable: {0}")]
    Analysis(#[from] AnalysisError),
}

/// `Analyzer` plus a bounded fingerprint-keyed result cache.
///
/// Cached results are clones of what the uncached analyzer returned for the
/// same fingerprint, so callers cannot observe whether a hit occurred.
#[derive(Debug)]
pub struct CachedAnalyzer {
    analyzer: Analyzer,
    config_digest: blake3::Hash,
    cache: ResultCache,
}

impl CachedAnalyzer {
    pub fn new(config: RunnerConfig) -> Result<Self, ConfigError> {
        let config_digest = Fingerprint::config_digest(&config.analysis);
        let analyzer = Analyzer::new(config.analysis)?;
        Ok(Self {
            analyzer,
            config_digest,
            cache: ResultCache::new(config.cache_capacity),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::new(RunnerConfig::from_file(path)?)
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn analyze(&self, input: &MarketInput) -> Result<AnalysisResult, AnalysisError> {
        if !self.cache.is_enabled() {
            return self.analyzer.analyze(input);
        }

        let key = Fingerprint::new(&self.config_digest, input);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        // Failures are not cached; the same bad input fails the same way.
        let result = self.analyzer.analyze(input)?;
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for CachedAnalyzer {
    fn default() -> Self {
        let config = RunnerConfig::default();
        Self {
            config_digest: Fingerprint::config_digest(&config.analysis),
            analyzer: Analyzer::default(),
            cache: ResultCache::new(config.cache_capacity),
        }
    }
}

/// Analyze one request.
pub fn run(analyzer: &CachedAnalyzer, input: &MarketInput) -> Result<AnalysisResult, RunError> {
    let result = analyzer.analyze(input)?;
    debug!(
        decision = %result.plan.decision,
        confidence = result.plan.confidence,
        "run complete"
    );
    Ok(result)
}
