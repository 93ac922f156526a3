//! Named in-process counters with an uptime clock.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

#[derive(Debug)]
struct Inner {
    counters: BTreeMap<String, u64>,
    started_at: Instant,
}

/// Point-in-time view of the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, u64>,
    pub uptime_seconds: u64,
}

/// Counter store keyed by name. Unknown counters read as zero.
///
/// Every increment is also forwarded to the global `metrics` recorder, so the
/// same counters appear on the Prometheus endpoint once it is installed.
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                counters: BTreeMap::new(),
                started_at: Instant::now(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    pub fn increment_by(&self, name: &str, amount: u64) {
        *self.lock().counters.entry(name.to_string()).or_insert(0) += amount;
        metrics::counter!(name.to_string()).increment(amount);
    }

    pub fn get(&self, name: &str) -> u64 {
        self.lock().counters.get(name).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.lock();
        MetricsSnapshot {
            counters: inner.counters.clone(),
            uptime_seconds: inner.started_at.elapsed().as_secs(),
        }
    }

    /// Drop all counters and restart the uptime clock.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.counters.clear();
        inner.started_at = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_default_to_zero() {
        let collector = MetricsCollector::new();
        assert_eq!(collector.get("users_created"), 0);
        assert!(collector.snapshot().counters.is_empty());
    }

    #[test]
    fn test_increment_accumulates() {
        let collector = MetricsCollector::new();
        collector.increment("users_created");
        collector.increment("users_created");
        collector.increment_by("users_deleted", 5);

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.counters["users_created"], 2);
        assert_eq!(snapshot.counters["users_deleted"], 5);
        assert_eq!(snapshot.uptime_seconds, 0);
    }

    #[test]
    fn test_reset_clears_counters() {
        let collector = MetricsCollector::new();
        collector.increment("users_created");
        collector.reset();

        assert_eq!(collector.get("users_created"), 0);
    }
}
