//! Service layer
//!
//! Validates parameters, consults the cache, calls the stats source on a miss
//! and stores the processed result. The cache lock is never held while the
//! source runs, so concurrent misses for one key each call the source and the
//! later store wins.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::cache::{CacheManager, INTERFACES_PREFIX, RANGE_PREFIX, STATS_PREFIX};
use crate::error::{AppError, Result};
use crate::models::{
    format_mb, CacheStatsResponse, Interface, InterfacesResponse, MemoryResponse,
    MessageResponse, ReportDate, StatsResponse,
};
use crate::source::Query;
use crate::stats::{self, Period};
use crate::system;

/// How long the interface list stays cached.
pub const INTERFACES_TTL: Duration = Duration::from_secs(5 * 60);

/// How long a range report stays cached.
pub const RANGE_TTL: Duration = Duration::from_secs(10 * 60);

/// Reported when no tracked interface has data.
pub const FALLBACK_INTERFACE: &str = "eth0";

const INTERFACE_LIST_MARKER: &str = "Available interfaces:";
const INTERFACE_LIST_ERROR_PREFIX: &str = "获取网络接口列表失败: ";
const CACHE_CLEARED_MESSAGE: &str = "缓存已清空";

/// Extracts interface names from `vnstat --iflist` output.
///
/// Names that would not pass interface validation are skipped.
pub fn parse_interface_list(listing: &str) -> Vec<Interface> {
    let Some(line) = listing.lines().find(|line| line.contains(INTERFACE_LIST_MARKER)) else {
        return Vec::new();
    };

    line.replacen(INTERFACE_LIST_MARKER, "", 1)
        .split_whitespace()
        .filter_map(|name| match Interface::parse(name) {
            Ok(interface) => Some(interface),
            Err(_) => {
                debug!("Skipping listed interface {:?}", name);
                None
            }
        })
        .collect()
}

impl AppState {
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let hit = self.cache.write().await.get(key)?;
        match serde_json::from_value(hit) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: String, value: &T, ttl: Duration) {
        match serde_json::to_value(value) {
            Ok(json) => self.cache.write().await.set(key, json, ttl),
            Err(e) => warn!("Not caching {}: {}", key, e),
        }
    }

    /// Interfaces that have recorded data.
    pub async fn interfaces(&self) -> Result<InterfacesResponse> {
        let key = CacheManager::generate_key(INTERFACES_PREFIX, &[]);
        if let Some(hit) = self.cached(&key).await {
            return Ok(hit);
        }

        let listing = self
            .source
            .fetch(&Query::InterfaceList)
            .await
            .map_err(|e| AppError::Command(format!("{}{}", INTERFACE_LIST_ERROR_PREFIX, e)))?;

        let mut interfaces = Vec::new();
        for interface in parse_interface_list(&listing) {
            match self.source.fetch(&Query::Probe(interface.clone())).await {
                Ok(summary) if !summary.trim().is_empty() => {
                    interfaces.push(interface.to_string())
                }
                Ok(_) => debug!("Interface {} has no data", interface),
                Err(e) => debug!("Interface {} probe failed: {}", interface, e),
            }
        }

        if interfaces.is_empty() {
            interfaces.push(FALLBACK_INTERFACE.to_string());
        }

        let response = InterfacesResponse::new(interfaces);
        self.store(key, &response, INTERFACES_TTL).await;
        Ok(response)
    }

    /// Processed report for one interface and period code.
    pub async fn stats(&self, interface: &str, period: &str) -> Result<StatsResponse> {
        let interface = Interface::parse(interface)?;
        let period: Period = period.parse()?;

        let Some(ttl) = period.cache_ttl() else {
            return self.fetch_stats(interface, period).await;
        };

        let key = CacheManager::generate_key(STATS_PREFIX, &[interface.as_str(), period.code()]);
        if let Some(hit) = self.cached(&key).await {
            return Ok(hit);
        }

        let response = self.fetch_stats(interface, period).await?;
        self.store(key, &response, ttl).await;
        Ok(response)
    }

    async fn fetch_stats(&self, interface: Interface, period: Period) -> Result<StatsResponse> {
        let raw = self
            .source
            .fetch(&Query::Period { interface, period })
            .await?;
        Ok(StatsResponse::new(stats::process(&raw, period)))
    }

    /// Translated daily report between two dates, inclusive.
    pub async fn range(&self, interface: &str, start: &str, end: &str) -> Result<StatsResponse> {
        let interface = Interface::parse(interface)?;
        let start = ReportDate::parse(start)?;
        let end = ReportDate::parse(end)?;

        let start_text = start.to_string();
        let end_text = end.to_string();
        let key = CacheManager::generate_key(
            RANGE_PREFIX,
            &[interface.as_str(), start_text.as_str(), end_text.as_str()],
        );
        if let Some(hit) = self.cached(&key).await {
            return Ok(hit);
        }

        let raw = self
            .source
            .fetch(&Query::Range {
                interface,
                start,
                end,
            })
            .await?;

        let response = StatsResponse::new(stats::process_range(&raw));
        self.store(key, &response, RANGE_TTL).await;
        Ok(response)
    }

    pub async fn cache_stats(&self) -> CacheStatsResponse {
        let stats = self.cache.read().await.stats();
        CacheStatsResponse::from(&stats)
    }

    pub async fn clear_cache(&self) -> MessageResponse {
        let mut cache = self.cache.write().await;
        let dropped = cache.len();
        cache.clear();
        info!("Cache cleared, {} entries dropped", dropped);
        MessageResponse::new(CACHE_CLEARED_MESSAGE)
    }

    /// Process memory alongside the cache's estimated footprint.
    pub async fn memory(&self) -> Result<MemoryResponse> {
        let process = system::process_memory()
            .ok_or_else(|| AppError::Internal("process memory unavailable".to_string()))?;
        let cache_bytes = self.cache.read().await.memory_usage();

        Ok(MemoryResponse {
            rss: format_mb(process.rss),
            virtual_memory: format_mb(process.virtual_memory),
            cache_memory: format_mb(cache_bytes as u64),
        })
    }
}
