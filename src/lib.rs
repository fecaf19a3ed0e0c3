//! vnstat API - network traffic statistics over HTTP
//!
//! Serves vnstat reports translated into Simplified Chinese and normalized into
//! five-column tables, behind a TTL/LRU cache with a memory ceiling.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod source;
pub mod stats;
pub mod system;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_cleanup_task, spawn_memory_monitor};
