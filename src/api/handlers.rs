//! API Handlers
//!
//! HTTP request handlers for each endpoint. Validation, caching and the call
//! to the stats source live in the service layer; handlers only extract and
//! wrap.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::CacheManager;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CacheStatsResponse, InterfacesResponse, MemoryResponse, MessageResponse, StatsResponse,
    VersionResponse,
};
use crate::source::{StatsSource, VnstatCli};

/// Application state shared across all handlers.
///
/// Holds the response cache behind `Arc<RwLock<>>` and the source of raw
/// reports.
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: Arc<RwLock<CacheManager>>,
    /// Where raw reports come from
    pub source: Arc<dyn StatsSource>,
}

impl AppState {
    /// Creates a new AppState with the given cache and source.
    pub fn new(cache: CacheManager, source: Arc<dyn StatsSource>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            source,
        }
    }

    /// Creates a new AppState from configuration, backed by the vnstat binary.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheManager::new(config.max_entries, config.max_memory_bytes());
        Self::new(cache, Arc::new(VnstatCli::from_config(config)))
    }
}

/// Handler for GET /api/interfaces
pub async fn interfaces_handler(State(state): State<AppState>) -> Result<Json<InterfacesResponse>> {
    Ok(Json(state.interfaces().await?))
}

/// Handler for GET /api/stats/:interface/:period
pub async fn stats_handler(
    State(state): State<AppState>,
    Path((interface, period)): Path<(String, String)>,
) -> Result<Json<StatsResponse>> {
    Ok(Json(state.stats(&interface, &period).await?))
}

/// Handler for GET /api/stats/:interface/range/:start/:end
pub async fn range_handler(
    State(state): State<AppState>,
    Path((interface, start, end)): Path<(String, String, String)>,
) -> Result<Json<StatsResponse>> {
    Ok(Json(state.range(&interface, &start, &end).await?))
}

/// Handler for GET /api/version
pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse::current())
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(state.cache_stats().await)
}

/// Handler for POST /api/cache/clear
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(state.clear_cache().await)
}

/// Handler for GET /api/system/memory
pub async fn memory_handler(State(state): State<AppState>) -> Result<Json<MemoryResponse>> {
    Ok(Json(state.memory().await?))
}
