//! Response DTOs for the traffic statistics API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Formats a byte count as `N.NNMB`.
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / BYTES_PER_MB)
}

/// Formats a hit rate as `NN.NN%`, or `0%` before any lookup.
pub fn format_hit_rate(stats: &CacheStats) -> String {
    if stats.hits + stats.misses == 0 {
        "0%".to_string()
    } else {
        format!("{:.2}%", stats.hit_rate())
    }
}

/// Processed report lines (GET /api/stats/...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub data: Vec<String>,
}

impl StatsResponse {
    pub fn new(data: Vec<String>) -> Self {
        Self { data }
    }
}

/// Interfaces with data (GET /api/interfaces)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfacesResponse {
    pub interfaces: Vec<String>,
}

impl InterfacesResponse {
    pub fn new(interfaces: Vec<String>) -> Self {
        Self { interfaces }
    }
}

/// Response body for GET /api/cache/stats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub evictions: u64,
    /// Formatted as `NN.NN%`
    pub hit_rate: String,
    /// Current number of entries
    pub size: usize,
    /// Entry capacity
    pub max_size: usize,
    /// Formatted as `N.NNMB`
    pub memory_usage: String,
    pub max_memory: String,
}

impl From<&CacheStats> for CacheStatsResponse {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            sets: stats.sets,
            deletes: stats.deletes,
            evictions: stats.evictions,
            hit_rate: format_hit_rate(stats),
            size: stats.entries,
            max_size: stats.max_entries,
            memory_usage: format_mb(stats.memory_bytes as u64),
            max_memory: format_mb(stats.max_memory_bytes as u64),
        }
    }
}

/// Response body for GET /api/system/memory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResponse {
    pub rss: String,
    pub virtual_memory: String,
    pub cache_memory: String,
}

/// Response body for GET /api/version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

impl VersionResponse {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Plain acknowledgement message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
