//! Cache Statistics Module
//!
//! Tracks cache performance counters and capacity usage.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache counters and usage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Successful lookups
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Insertions (including overwrites)
    pub sets: u64,
    /// Explicit deletions that removed an entry
    pub deletes: u64,
    /// Entries dropped by LRU eviction
    pub evictions: u64,
    /// Current number of entries
    pub entries: usize,
    /// Entry capacity
    pub max_entries: usize,
    /// Current estimated payload bytes
    pub memory_bytes: usize,
    /// Memory ceiling in bytes
    pub max_memory_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hit rate as a percentage in `0.0..=100.0`.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
