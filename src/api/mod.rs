//! API Module
//!
//! HTTP handlers and routing for the traffic statistics REST API.
//!
//! # Endpoints
//! - `GET /api/interfaces` - Interfaces with recorded traffic
//! - `GET /api/stats/:interface/:period` - Processed report for a period
//! - `GET /api/stats/:interface/range/:start/:end` - Daily report for a date range
//! - `GET /api/version` - Server version
//! - `GET /api/cache/stats` - Cache counters and usage
//! - `POST /api/cache/clear` - Drop every cached response
//! - `GET /api/system/memory` - Process and cache memory

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
