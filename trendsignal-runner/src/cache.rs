//! In-memory result cache keyed by request fingerprint.
//!
//! Bounded by entry count. When full, the whole map is dropped before the
//! next new key is inserted.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use trendsignal_core::AnalysisResult;

use crate::fingerprint::Fingerprint;

/// Hit/miss counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    entries: RwLock<HashMap<Fingerprint, AnalysisResult>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn get(&self, key: &Fingerprint) -> Option<AnalysisResult> {
        let hit = self.entries.read().get(key).cloned();
        match hit {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(fingerprint = %key, "cache hit");
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(fingerprint = %key, "cache miss");
            }
        }
        hit
    }

    pub fn insert(&self, key: Fingerprint, result: AnalysisResult) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self.entries.write();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            debug!(capacity = self.capacity, "cache full, clearing");
            entries.clear();
        }
        entries.insert(key, result);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendsignal_core::{AnalysisConfig, Analyzer, MarketInput};

    fn entry(prices: Vec<f64>) -> (Fingerprint, AnalysisResult) {
        let digest = Fingerprint::config_digest(&AnalysisConfig::default());
        let input = MarketInput::from_prices(prices);
        let result = Analyzer::default().analyze(&input).unwrap();
        (Fingerprint::new(&digest, &input), result)
    }

    #[test]
    fn get_after_insert() {
        let cache = ResultCache::new(4);
        let (key, result) = entry(vec![1.0, 2.0, 3.0]);
        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), result.clone());
        assert_eq!(cache.get(&key), Some(result));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn clears_when_full() {
        let cache = ResultCache::new(2);
        let (a, ra) = entry(vec![1.0]);
        let (b, rb) = entry(vec![2.0]);
        let (c, rc) = entry(vec![3.0]);
        cache.insert(a.clone(), ra);
        cache.insert(b.clone(), rb);
        assert_eq!(cache.len(), 2);
        cache.insert(c.clone(), rc);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&a).is_none());
        assert!(cache.get(&c).is_some());
    }

    #[test]
    fn reinserting_existing_key_does_not_clear() {
        let cache = ResultCache::new(2);
        let (a, ra) = entry(vec![1.0]);
        let (b, rb) = entry(vec![2.0]);
        cache.insert(a.clone(), ra.clone());
        cache.insert(b, rb);
        cache.insert(a, ra);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let cache = ResultCache::new(0);
        let (key, result) = entry(vec![1.0]);
        cache.insert(key.clone(), result);
        assert!(cache.is_empty());
        assert!(cache.get(&key).is_none());
    }
}
