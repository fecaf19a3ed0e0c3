//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and access tracking.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;

/// Size charged for scalar payloads and for payloads that fail to serialize.
pub const SCALAR_SIZE: usize = 8;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Estimated size of the payload in bytes
    pub size: usize,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Last successful read or write (Unix milliseconds)
    pub last_accessed: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = current_timestamp_ms();
        let size = estimate_size(&value);

        Self {
            value,
            size,
            expires_at: now.saturating_add(ttl.as_millis() as u64),
            last_accessed: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired only once `now` is strictly after `expires_at`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now > self.expires_at
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self, now: u64) {
        self.last_accessed = now;
    }
}

// == Size Estimation ==
/// Estimates the memory footprint of a payload.
///
/// Strings count their UTF-8 length, arrays and objects their serialized JSON
/// length, and scalars a fixed [`SCALAR_SIZE`].
pub fn estimate_size(value: &Value) -> usize {
    match value {
        Value::String(s) => s.len(),
        Value::Array(_) | Value::Object(_) => serde_json::to_vec(value)
            .map(|bytes| bytes.len())
            .unwrap_or(SCALAR_SIZE),
        Value::Null | Value::Bool(_) | Value::Number(_) => SCALAR_SIZE,
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
