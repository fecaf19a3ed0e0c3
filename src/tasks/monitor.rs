//! Memory Monitor Task
//!
//! Periodically logs process memory next to the cache's footprint and hit rate.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::CacheManager;
use crate::models::format_mb;
use crate::system;

/// Spawns the memory monitor. The returned handle is aborted on shutdown.
pub fn spawn_memory_monitor(cache: Arc<RwLock<CacheManager>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting memory monitor with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;
            log_memory(&cache).await;
        }
    })
}

async fn log_memory(cache: &RwLock<CacheManager>) {
    let stats = cache.read().await.stats();

    let cache_memory = format_mb(stats.memory_bytes as u64);

    match system::process_memory() {
        Some(memory) => info!(
            "Memory usage: rss={}, virtual={}, cache={} ({} entries), hit rate={:.2}%",
            format_mb(memory.rss),
            format_mb(memory.virtual_memory),
            cache_memory,
            stats.entries,
            stats.hit_rate()
        ),
        None => warn!("Process memory unavailable, cache={}", cache_memory),
    }
}
