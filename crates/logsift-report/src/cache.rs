use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Cached value with its expiry instant
#[derive(Clone, Debug)]
struct CachedResponse<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CachedResponse<V> {
    fn is_valid(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe in-memory cache of model responses with per-entry TTL
#[derive(Clone)]
pub struct ResponseCache<V> {
    entries: Arc<RwLock<HashMap<String, CachedResponse<V>>>>,
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> ResponseCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get a value if present and not expired; expired entries are evicted
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.is_valid(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        tracing::debug!(key, "cache entry expired");
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|e| !e.is_valid(now)) {
            entries.remove(key);
        }
        None
    }

    /// Store a value for `ttl`
    pub fn insert(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .insert(key.into(), CachedResponse { value, expires_at });
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.write().retain(|_, e| e.is_valid(now));
    }

    /// Entry count, including expired entries not yet evicted
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<V> std::fmt::Debug for ResponseCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}
