//! Cache Module
//!
//! Provides an in-memory response cache with TTL expiration, LRU eviction and
//! a memory ceiling.

mod entry;
mod lru;
mod manager;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{estimate_size, CacheEntry, SCALAR_SIZE};
pub use lru::LruTracker;
pub use manager::CacheManager;
pub use stats::CacheStats;

/// Cache key prefix for the interface list
pub const INTERFACES_PREFIX: &str = "interfaces";

/// Cache key prefix for per-period statistics
pub const STATS_PREFIX: &str = "stats";

/// Cache key prefix for date-ranged reports
pub const RANGE_PREFIX: &str = "range";
