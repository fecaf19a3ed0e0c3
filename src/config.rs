//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Cache memory ceiling in megabytes
    pub max_memory_mb: usize,
    /// Expiry sweep interval in milliseconds
    pub cleanup_interval_ms: u64,
    /// Memory monitor log interval in milliseconds
    pub memory_monitor_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Path or name of the vnstat binary
    pub vnstat_bin: String,
    /// Upper bound for a single vnstat invocation in milliseconds
    pub command_timeout_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 10089)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_MAX_MEMORY_MB` - Cache memory ceiling in MB (default: 50)
    /// - `CACHE_CLEANUP_INTERVAL` - Expiry sweep interval in ms (default: 60000)
    /// - `MEMORY_MONITOR_INTERVAL` - Memory log interval in ms (default: 300000)
    /// - `VNSTAT_BIN` - vnstat executable (default: `vnstat`)
    /// - `VNSTAT_TIMEOUT_MS` - vnstat invocation timeout in ms (default: 10000)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Missing, unparseable or zero values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_entries: parse_nonzero_or(&lookup, "CACHE_MAX_SIZE", defaults.max_entries),
            max_memory_mb: parse_nonzero_or(&lookup, "CACHE_MAX_MEMORY_MB", defaults.max_memory_mb),
            cleanup_interval_ms: parse_nonzero_or(
                &lookup,
                "CACHE_CLEANUP_INTERVAL",
                defaults.cleanup_interval_ms,
            ),
            memory_monitor_interval_ms: parse_nonzero_or(
                &lookup,
                "MEMORY_MONITOR_INTERVAL",
                defaults.memory_monitor_interval_ms,
            ),
            server_port: parse_nonzero_or(&lookup, "PORT", defaults.server_port),
            vnstat_bin: lookup("VNSTAT_BIN")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.vnstat_bin),
            command_timeout_ms: parse_nonzero_or(&lookup, "VNSTAT_TIMEOUT_MS", defaults.command_timeout_ms),
        }
    }

    /// Cache memory ceiling in bytes.
    pub fn max_memory_bytes(&self) -> usize {
        self.max_memory_mb * 1024 * 1024
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }

    pub fn memory_monitor_interval(&self) -> Duration {
        Duration::from_millis(self.memory_monitor_interval_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

/// Reads a positive number; missing, unparseable and zero values yield `default`.
fn parse_nonzero_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Default + PartialEq,
{
    lookup(name)
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| *v != T::default())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 100,
            max_memory_mb: 50,
            cleanup_interval_ms: 60_000,
            memory_monitor_interval_ms: 300_000,
            server_port: 10089,
            vnstat_bin: "vnstat".to_string(),
            command_timeout_ms: 10_000,
        }
    }
}
