//! Veracity Result Cache
//!
//! Content-addressed, TTL-based storage for full verification results,
//! backed by SQLite.
//!
//! # Contract
//!
//! - Keys for verification results are `"verification:" + hex(sha256(content))`
//! - Values are any serde-serializable type, stored as JSON
//! - `get`/`set`/`delete` never fail outward: errors are logged and read
//!   as a miss or a no-op
//! - The connection is explicit: [`ResultCache::connect`] before use,
//!   [`ResultCache::close`] when done. Calls made while disconnected are
//!   misses.
//!
//! # Examples
//!
//! ```
//! use veracity_cache::{CacheConfig, ResultCache};
//!
//! let cache = ResultCache::open(CacheConfig::in_memory());
//! cache.connect().unwrap();
//!
//! let hash = ResultCache::content_hash("Some page text");
//! assert!(cache.cache_verification(&hash, &vec![1, 2, 3], None));
//! assert_eq!(cache.get_cached_verification::<Vec<i32>>(&hash), Some(vec![1, 2, 3]));
//! ```

#![warn(missing_docs)]

mod config;

pub use config::CacheConfig;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Key prefix for cached verification results
pub const VERIFICATION_PREFIX: &str = "verification:";

/// Errors that can occur during cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Used before `connect()` or after `close()`
    #[error("Cache is not connected")]
    NotConnected,
}

/// SQLite-backed result cache
///
/// # Thread Safety
///
/// The single connection sits behind a mutex, so concurrent callers are
/// serialized.
pub struct ResultCache {
    config: CacheConfig,
    conn: Mutex<Option<Connection>>,
}

impl ResultCache {
    /// Create a disconnected cache handle
    pub fn open(config: CacheConfig) -> Self {
        Self {
            config,
            conn: Mutex::new(None),
        }
    }

    /// Open the database and create the schema
    ///
    /// Reconnecting replaces the current connection.
    pub fn connect(&self) -> Result<(), CacheError> {
        let conn = Connection::open(&self.config.path)?;
        conn.execute_batch(include_str!("schema.sql"))?;

        *self.connection() = Some(conn);
        info!("Result cache connected at {}", self.config.path.display());
        Ok(())
    }

    /// Drop the connection
    pub fn close(&self) {
        if self.connection().take().is_some() {
            info!("Result cache closed");
        }
    }

    /// Whether `connect()` has succeeded and `close()` has not been called
    pub fn is_connected(&self) -> bool {
        self.connection().is_some()
    }

    /// Hex-encoded SHA-256 of `content`
    pub fn content_hash(content: &str) -> String {
        format!("{:x}", Sha256::digest(content.as_bytes()))
    }

    /// Fetch and decode a live entry
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache get failed for {}: {}", key, e);
                None
            }
        }
    }

    /// Store `value` under `key`, expiring after `ttl` (default TTL if `None`)
    ///
    /// Returns whether the value was written.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> bool {
        let ttl = ttl.unwrap_or_else(|| self.config.default_ttl());
        match self.try_set(key, value, ttl) {
            Ok(()) => true,
            Err(e) => {
                warn!("Cache set failed for {}: {}", key, e);
                false
            }
        }
    }

    /// Remove `key`; returns whether an entry was removed
    pub fn delete(&self, key: &str) -> bool {
        match self.with_conn(|conn| Ok(conn.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])?)) {
            Ok(removed) => removed > 0,
            Err(e) => {
                warn!("Cache delete failed for {}: {}", key, e);
                false
            }
        }
    }

    /// Look up a verification result by content hash
    pub fn get_cached_verification<T: DeserializeOwned>(&self, content_hash: &str) -> Option<T> {
        self.get(&verification_key(content_hash))
    }

    /// Store a verification result by content hash
    ///
    /// Defaults to the content-hash TTL rather than the general one.
    pub fn cache_verification<T: Serialize>(&self, content_hash: &str, result: &T, ttl: Option<Duration>) -> bool {
        let ttl = ttl.unwrap_or_else(|| self.config.content_hash_ttl());
        self.set(&verification_key(content_hash), result, Some(ttl))
    }

    /// Remove a verification result by content hash
    pub fn delete_verification(&self, content_hash: &str) -> bool {
        self.delete(&verification_key(content_hash))
    }

    /// Delete every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = unix_now();
        match self.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM cache_entries WHERE expires_at <= ?1", params![now])?)
        }) {
            Ok(removed) => {
                info!("Purged {} expired cache entries", removed);
                removed
            }
            Err(e) => {
                warn!("Cache purge failed: {}", e);
                0
            }
        }
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let now = unix_now();
        let row = self.with_conn(|conn| {
            let row: Option<(String, i64)> = conn
                .query_row(
                    "SELECT value, expires_at FROM cache_entries WHERE key = ?1",
                    params![key],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            match row {
                Some((_, expires_at)) if expires_at <= now => {
                    conn.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])?;
                    debug!("Cache entry {} expired", key);
                    Ok(None)
                }
                Some((value, _)) => Ok(Some(value)),
                None => Ok(None),
            }
        })?;

        match row {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn try_set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;
        let now = unix_now();
        let expires_at = now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO cache_entries (key, value, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     created_at = excluded.created_at,
                     expires_at = excluded.expires_at",
                params![key, json, now, expires_at],
            )?;
            Ok(())
        })
    }

    fn with_conn<R>(&self, f: impl FnOnce(&Connection) -> Result<R, CacheError>) -> Result<R, CacheError> {
        let guard = self.connection();
        let conn = guard.as_ref().ok_or(CacheError::NotConnected)?;
        f(conn)
    }

    fn connection(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn verification_key(content_hash: &str) -> String {
    format!("{}{}", VERIFICATION_PREFIX, content_hash)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Report {
        page_score: u8,
        claims: Vec<String>,
    }

    fn report() -> Report {
        Report {
            page_score: 72,
            claims: vec!["c1".to_string(), "c2".to_string()],
        }
    }

    fn connected() -> ResultCache {
        let cache = ResultCache::open(CacheConfig::in_memory());
        cache.connect().unwrap();
        cache
    }

    #[test]
    fn test_content_hash_is_sha256_hex() {
        assert_eq!(
            ResultCache::content_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(ResultCache::content_hash("").len(), 64);
    }

    #[test]
    fn test_set_get_delete() {
        let cache = connected();
        assert!(cache.set("k", &report(), None));
        assert_eq!(cache.get::<Report>("k"), Some(report()));

        assert!(cache.delete("k"));
        assert_eq!(cache.get::<Report>("k"), None);
        assert!(!cache.delete("k"));
    }

    #[test]
    fn test_overwrite() {
        let cache = connected();
        cache.set("k", &1, None);
        cache.set("k", &2, None);
        assert_eq!(cache.get::<i32>("k"), Some(2));
    }

    #[test]
    fn test_verification_key_prefix() {
        let cache = connected();
        let hash = ResultCache::content_hash("page");
        assert!(cache.cache_verification(&hash, &report(), None));

        let raw: Option<Report> = cache.get(&format!("verification:{}", hash));
        assert_eq!(raw, Some(report()));
        assert_eq!(cache.get_cached_verification::<Report>(&hash), Some(report()));

        assert!(cache.delete_verification(&hash));
        assert_eq!(cache.get_cached_verification::<Report>(&hash), None);
    }

    #[test]
    fn test_expired_entry_is_miss() {
        let cache = connected();
        cache.set("k", &report(), Some(Duration::ZERO));
        assert_eq!(cache.get::<Report>("k"), None);
    }

    #[test]
    fn test_purge_expired() {
        let cache = connected();
        cache.set("old1", &1, Some(Duration::ZERO));
        cache.set("old2", &2, Some(Duration::ZERO));
        cache.set("fresh", &3, Some(Duration::from_secs(600)));

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.get::<i32>("fresh"), Some(3));
    }

    #[test]
    fn test_disconnected_is_miss_not_error() {
        let cache = ResultCache::open(CacheConfig::in_memory());
        assert!(!cache.is_connected());
        assert!(!cache.set("k", &1, None));
        assert_eq!(cache.get::<i32>("k"), None);
        assert!(!cache.delete("k"));
        assert_eq!(cache.purge_expired(), 0);
    }

    #[test]
    fn test_close() {
        let cache = connected();
        cache.set("k", &1, None);
        cache.close();
        assert!(!cache.is_connected());
        assert_eq!(cache.get::<i32>("k"), None);
    }

    #[test]
    fn test_type_mismatch_is_miss() {
        let cache = connected();
        cache.set("k", &"not a report", None);
        assert_eq!(cache.get::<Report>("k"), None);
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig {
            path: dir.path().join("cache.db"),
            ..CacheConfig::default()
        };

        let cache = ResultCache::open(config.clone());
        cache.connect().unwrap();
        cache.set("k", &report(), None);
        cache.close();

        let reopened = ResultCache::open(config);
        reopened.connect().unwrap();
        assert_eq!(reopened.get::<Report>("k"), Some(report()));
    }
}
