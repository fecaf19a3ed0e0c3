//! Request and Response models for the traffic statistics API
//!
//! This module defines validated path parameters and the DTOs used for
//! serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{Interface, ReportDate};
pub use responses::{
    format_mb, CacheStatsResponse, ErrorResponse, InterfacesResponse, MemoryResponse,
    MessageResponse, StatsResponse, VersionResponse,
};
