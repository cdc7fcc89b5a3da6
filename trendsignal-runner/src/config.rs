//! Runner configuration loaded from TOML.
//!
//! ```toml
//! preset = "extended"      # classic | scored | extended
//! cache_capacity = 256     # 0 disables the result cache
//!
//! [analysis.rsi]
//! period = 7
//!
//! [analysis.macd]
//! signal_mode = "smoothed"
//! ```
//!
//! The `[analysis]` table is overlaid key-by-key on the selected preset, so
//! only the parameters that differ need to be written.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use trendsignal_core::{AnalysisConfig, AnalysisError, Preset};

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to expand preset: {0}")]
    Preset(#[from] toml::ser::Error),
    #[error("invalid analysis config: {0}")]
    Invalid(#[from] AnalysisError),
}

/// On-disk shape: preset name plus partial overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    preset: Preset,
    cache_capacity: Option<usize>,
    analysis: toml::Table,
}

/// Fully resolved runner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub preset: Preset,
    pub cache_capacity: usize,
    pub analysis: AnalysisConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl RunnerConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            analysis: preset.config(),
        }
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!(
            path = %path.display(),
            preset = %config.preset,
            cache_capacity = config.cache_capacity,
            "loaded runner config"
        );
        Ok(config)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let mut merged = toml::Value::try_from(raw.preset.config())?;
        overlay(&mut merged, toml::Value::Table(raw.analysis));
        let analysis: AnalysisConfig = merged.try_into()?;
        analysis.validate()?;

        Ok(Self {
            preset: raw.preset,
            cache_capacity: raw.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY),
            analysis,
        })
    }
}

/// Recursively replace values in `base` with those present in `patch`.
fn overlay(base: &mut toml::Value, patch: toml::Value) {
    match (base, patch) {
        (toml::Value::Table(base), toml::Value::Table(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendsignal_core::indicators::MacdSignalMode;
    use trendsignal_core::DecisionVariant;

    #[test]
    fn empty_toml_is_classic() {
        let cfg = RunnerConfig::from_toml("").unwrap();
        assert_eq!(cfg, RunnerConfig::default());
        assert_eq!(cfg.analysis, Preset::Classic.config());
    }

    #[test]
    fn preset_selection() {
        let cfg = RunnerConfig::from_toml(r#"preset = "extended""#).unwrap();
        assert_eq!(cfg.preset, Preset::Extended);
        assert_eq!(cfg.analysis.decision, DecisionVariant::Extended);
        assert!(cfg.analysis.support_resistance.tiered);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let cfg = RunnerConfig::from_toml(
            r#"
            preset = "extended"
            cache_capacity = 8

            [analysis.rsi]
            period = 7

            [analysis.macd]
            signal_mode = "smoothed"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.cache_capacity, 8);
        assert_eq!(cfg.analysis.rsi.period, 7);
        assert_eq!(cfg.analysis.macd.signal_mode, MacdSignalMode::Smoothed);
        // untouched keys keep preset values
        assert_eq!(cfg.analysis.macd.fast, 12);
        assert!(cfg.analysis.support_resistance.tiered);
    }

    #[test]
    fn zero_period_is_invalid() {
        let err = RunnerConfig::from_toml("[analysis.sma]\nperiod = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn negative_period_is_a_parse_error() {
        let err = RunnerConfig::from_toml("[analysis.sma]\nperiod = -5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn unknown_preset_is_a_parse_error() {
        let err = RunnerConfig::from_toml(r#"preset = "turbo""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RunnerConfig::from_file(Path::new("/nonexistent/trendsignal.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/trendsignal.toml"));
    }
}
