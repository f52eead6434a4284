//! Configuration for the result cache

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the ResultCache
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// SQLite database file (`:memory:` for a private in-memory cache)
    pub path: PathBuf,

    /// TTL for `set` when none is given (seconds)
    pub default_ttl_secs: u64,

    /// TTL for verification results keyed by content hash (seconds)
    pub content_hash_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("veracity-cache.db"),
            default_ttl_secs: 3600,
            content_hash_ttl_secs: 86_400,
        }
    }
}

impl CacheConfig {
    /// In-memory cache, lost when the connection closes
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            ..Self::default()
        }
    }

    /// Default TTL as a Duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Content-hash TTL as a Duration
    pub fn content_hash_ttl(&self) -> Duration {
        Duration::from_secs(self.content_hash_ttl_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("path must not be empty".to_string());
        }
        if self.default_ttl_secs == 0 || self.content_hash_ttl_secs == 0 {
            return Err("TTLs must be greater than 0".to_string());
        }
        Ok(())
    }
}
