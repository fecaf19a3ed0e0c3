//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheManager;

/// Spawns a background task that periodically removes expired cache entries.
///
/// The task sleeps for `interval` between sweeps and takes the cache's write
/// lock only for the sweep itself.
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheManager::new(100, 50 * 1024 * 1024)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<RwLock<CacheManager>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup_expired();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(
                    "Cache cleanup: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
