//! TrendSignal Runner: the host-facing layer over `trendsignal-core`.
//!
//! - TOML configuration: preset selection plus per-indicator overrides
//! - BLAKE3 request fingerprints
//! - Bounded in-memory result cache shared behind a read-write lock
//! - `run`, the single call a host makes per request

pub mod cache;
pub mod config;
pub mod fingerprint;
pub mod runner;

pub use cache::{CacheStats, ResultCache};
pub use config::{ConfigError, RunnerConfig, DEFAULT_CACHE_CAPACITY};
pub use fingerprint::Fingerprint;
pub use runner::{run, CachedAnalyzer, RunError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: one cached analyzer can serve many threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<CachedAnalyzer>();
        require_sync::<CachedAnalyzer>();
        require_send::<RunnerConfig>();
        require_sync::<RunnerConfig>();
        require_send::<RunError>();
        require_sync::<RunError>();
    }
}
