//! API Routes
//!
//! Configures the Axum router with all traffic statistics endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache_handler, interfaces_handler, memory_handler, range_handler,
    stats_handler, version_handler, AppState,
};
use crate::error::handle_panic;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/interfaces` - Interfaces with recorded traffic
/// - `GET /api/stats/:interface/:period` - Processed report for a period
/// - `GET /api/stats/:interface/range/:start/:end` - Daily report for a date range
/// - `GET /api/version` - Server version
/// - `GET /api/cache/stats` - Cache counters and usage
/// - `POST /api/cache/clear` - Drop every cached response
/// - `GET /api/system/memory` - Process and cache memory
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
/// - Panic boundary: handler panics become a generic 500
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/interfaces", get(interfaces_handler))
        .route("/api/stats/:interface/:period", get(stats_handler))
        .route(
            "/api/stats/:interface/range/:start/:end",
            get(range_handler),
        )
        .route("/api/version", get(version_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/cache/clear", post(clear_cache_handler))
        .route("/api/system/memory", get(memory_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
