//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries at the configured interval
//! - Memory monitor: logs process and cache memory at the configured interval

mod cleanup;
mod monitor;

pub use cleanup::spawn_cleanup_task;
pub use monitor::spawn_memory_monitor;
