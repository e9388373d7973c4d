//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::num::NonZeroUsize;

use crate::cache::DEFAULT_TTL_MS;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in milliseconds for entries set without an explicit TTL
    pub default_ttl_ms: u64,
    /// Optional cap on stored entries; `None` leaves the cache unbounded
    pub max_entries: Option<NonZeroUsize>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `MAX_ENTRIES` - Maximum cache entries, 0 for unbounded (default: 0)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            default_ttl_ms: parse_var("DEFAULT_TTL_MS").unwrap_or(DEFAULT_TTL_MS),
            max_entries: parse_var("MAX_ENTRIES").and_then(NonZeroUsize::new),
            server_port: parse_var("SERVER_PORT").unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_ms: DEFAULT_TTL_MS,
            max_entries: None,
            server_port: 3000,
        }
    }
}

/// Reads and parses an environment variable, ignoring unset or malformed values.
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
