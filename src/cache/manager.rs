//! Cache Manager Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, TTL expiration
//! and a memory ceiling.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Manager ==
/// Bounded response cache with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheManager {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance counters
    stats: CacheStats,
    /// Sum of the estimated sizes of all entries
    memory_bytes: usize,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Memory ceiling in bytes
    max_memory_bytes: usize,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a new CacheManager with the given entry and memory bounds.
    pub fn new(max_entries: usize, max_memory_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            memory_bytes: 0,
            max_entries,
            max_memory_bytes,
        }
    }

    // == Key Generation ==
    /// Builds a cache key as `prefix:param1:param2...`.
    ///
    /// Parameters are joined verbatim; callers must not pass values containing `:`
    /// if they need keys to stay unambiguous.
    pub fn generate_key(prefix: &str, params: &[&str]) -> String {
        format!("{}:{}", prefix, params.join(":"))
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit refreshes the entry's access time. Missing and expired entries count
    /// as misses; expired entries are removed.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = current_timestamp_ms();

        let expired = match self.entries.get_mut(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) if entry.is_expired_at(now) => true,
            Some(entry) => {
                entry.touch(now);
                let value = entry.value.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                return Some(value);
            }
        };

        if expired {
            self.remove_entry(key);
        }
        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores a value with the given TTL.
    ///
    /// When the cache is at capacity or over its memory ceiling, exactly one
    /// least recently used entry is evicted first.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Duration) {
        let key = key.into();

        if self.should_evict() {
            self.evict_lru();
        }

        let entry = CacheEntry::new(value, ttl);
        self.memory_bytes += entry.size;
        if let Some(previous) = self.entries.insert(key.clone(), entry) {
            self.memory_bytes -= previous.size;
        }
        self.lru.touch(&key);
        self.stats.record_set();
    }

    // == Delete ==
    /// Removes an entry, reporting whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key);
        if removed {
            self.stats.record_delete();
        }
        removed
    }

    // == Cleanup Expired ==
    /// Removes every expired entry regardless of access recency.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        expired_keys.len()
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.memory_bytes = 0;
    }

    // == Stats ==
    /// Returns a snapshot of counters and usage.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            max_entries: self.max_entries,
            memory_bytes: self.memory_bytes,
            max_memory_bytes: self.max_memory_bytes,
            ..self.stats.clone()
        }
    }

    /// Current estimated payload bytes.
    pub fn memory_usage(&self) -> usize {
        self.memory_bytes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_memory_bytes(&self) -> usize {
        self.max_memory_bytes
    }

    fn should_evict(&self) -> bool {
        self.entries.len() >= self.max_entries || self.memory_bytes > self.max_memory_bytes
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self.lru.evict_oldest() {
            if let Some(entry) = self.entries.remove(&key) {
                self.memory_bytes -= entry.size;
                self.stats.record_eviction();
                debug!("Evicted least recently used cache entry {}", key);
            }
        }
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.memory_bytes -= entry.size;
                self.lru.remove(key);
                true
            }
            None => false,
        }
    }
}
