//! Cache metrics and observability.
//!
//! Counters are owned by each `LocaleContentCache` rather than a global, so
//! independent caches (and tests) never see each other's numbers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for a single cache.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Lookups that joined an existing entry (pending or settled)
    hits: AtomicUsize,

    /// Lookups that created a new entry and started a fetch
    misses: AtomicUsize,

    /// Fetches that settled to a failure
    fetch_failures: AtomicUsize,
}

impl CacheMetrics {
    /// Create a set of counters, all at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup that joined an existing entry.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that created an entry and started its fetch.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fetch that settled to a failure.
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total cache hits.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get total cache misses.
    ///
    /// Equal to the number of fetches ever started.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get total failed fetches.
    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let misses = self.misses();
        let total_lookups = hits + misses;
        let hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            misses,
            hit_rate,
            fetch_failures: self.fetch_failures(),
        }
    }
}

/// Point-in-time snapshot of cache metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Lookups served by an existing entry
    pub hits: usize,
    /// Lookups that started a fetch
    pub misses: usize,
    /// Hit rate as a percentage (0.0 - 100.0)
    pub hit_rate: f64,
    /// Fetches that settled to a failure
    pub fetch_failures: usize,
}
