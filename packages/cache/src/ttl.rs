// ABOUTME: TTL cache keyed by prefix plus request identity
// ABOUTME: Capacity-bound map with time-based expiry and an injected clock

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// Configuration for a [`TtlCache`]
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// When false every lookup misses and every insert is dropped
    pub enabled: bool,
    /// How long a stored entry stays valid
    pub ttl: Duration,
    /// Prepended to every key built with [`TtlCache::key`]
    pub key_prefix: String,
    /// Upper bound on stored entries
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(5 * 60),
            key_prefix: String::new(),
            capacity: 256,
        }
    }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Time-boxed cache for response payloads
///
/// Constructed by the composition root and shared via `Arc`. Entries expire
/// `ttl` after insertion; when the capacity bound is hit, expired entries are
/// dropped first, then the entry closest to expiry. Concurrent misses for the
/// same key are not coalesced; both fetches run and the last writer wins.
pub struct TtlCache<V> {
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache backed by the system clock
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Build a cache key from the configured prefix and request identity
    pub fn key(&self, parts: &[&str]) -> String {
        let mut key = self.config.key_prefix.clone();
        for part in parts {
            if !key.is_empty() {
                key.push(':');
            }
            key.push_str(part);
        }
        key
    }

    /// Look up a key, dropping the entry if it has expired
    pub fn get(&self, key: &str) -> Option<V> {
        if !self.config.enabled {
            return None;
        }

        let now = self.clock.now();
        let mut entries = self.lock_entries();

        let expired = match entries.get(key) {
            Some(entry) if now <= entry.expires_at => {
                debug!("cache hit for key: {}", key);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("cache entry expired for key: {}", key);
            entries.remove(key);
        } else {
            debug!("cache miss for key: {}", key);
        }
        None
    }

    /// Store a value under a key, stamping it with `now + ttl`
    pub fn insert(&self, key: impl Into<String>, value: V) {
        if !self.config.enabled {
            return;
        }

        let key = key.into();
        let now = self.clock.now();
        let mut entries = self.lock_entries();

        if !entries.contains_key(&key) && entries.len() >= self.config.capacity {
            entries.retain(|_, entry| now <= entry.expires_at);

            if entries.len() >= self.config.capacity {
                // Still full of live entries; drop the one closest to expiry
                let evictee = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.expires_at)
                    .map(|(k, _)| k.clone());
                if let Some(evictee) = evictee {
                    debug!("cache at capacity, evicting key: {}", evictee);
                    entries.remove(&evictee);
                }
            }
        }

        entries.insert(
            key,
            Entry {
                value,
                expires_at: now + self.config.ttl,
            },
        );
    }

    /// Return the cached value for `key`, or run `fetch` and store its result
    ///
    /// Fetch errors are returned to the caller and never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = fetch().await?;
        self.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Number of stored entries, expired or not
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored entry
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Test clock advanced explicitly from the test body
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    fn cache_with_manual_clock(config: CacheConfig) -> (TtlCache<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(config, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_hit_within_ttl() {
        let (cache, clock) = cache_with_manual_clock(CacheConfig::default());
        cache.insert("agents", "payload".to_string());

        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get("agents"), Some("payload".to_string()));
    }

    #[test]
    fn test_expiry_after_ttl() {
        let (cache, clock) = cache_with_manual_clock(CacheConfig {
            ttl: Duration::from_secs(300),
            ..CacheConfig::default()
        });
        cache.insert("agents", "payload".to_string());

        clock.advance(Duration::from_secs(301));
        assert_eq!(cache.get("agents"), None);
        // Expired entry is removed on observation
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_overwrites_and_restamps() {
        let (cache, clock) = cache_with_manual_clock(CacheConfig {
            ttl: Duration::from_secs(300),
            ..CacheConfig::default()
        });
        cache.insert("agents", "stale".to_string());

        clock.advance(Duration::from_secs(200));
        cache.insert("agents", "fresh".to_string());

        clock.advance(Duration::from_secs(200));
        assert_eq!(cache.get("agents"), Some("fresh".to_string()));
    }

    #[test]
    fn test_disabled_cache_never_stores() {
        let (cache, _clock) = cache_with_manual_clock(CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        });
        cache.insert("agents", "payload".to_string());

        assert_eq!(cache.get("agents"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_includes_prefix_and_parts() {
        let cache: TtlCache<String> = TtlCache::new(CacheConfig {
            key_prefix: "agents".to_string(),
            ..CacheConfig::default()
        });

        assert_eq!(cache.key(&[]), "agents");
        assert_eq!(cache.key(&["v1", "all"]), "agents:v1:all");
    }

    #[test]
    fn test_key_without_prefix() {
        let cache: TtlCache<String> = TtlCache::new(CacheConfig::default());
        assert_eq!(cache.key(&["servers", "abc"]), "servers:abc");
    }

    #[test]
    fn test_capacity_evicts_expired_first() {
        let (cache, clock) = cache_with_manual_clock(CacheConfig {
            ttl: Duration::from_secs(300),
            capacity: 2,
            ..CacheConfig::default()
        });
        cache.insert("a", "1".to_string());
        clock.advance(Duration::from_secs(301));
        cache.insert("b", "2".to_string());

        // "a" is expired; inserting a third key drops it rather than "b"
        cache.insert("c", "3".to_string());
        assert_eq!(cache.get("b"), Some("2".to_string()));
        assert_eq!(cache.get("c"), Some("3".to_string()));
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_capacity_evicts_closest_to_expiry() {
        let (cache, clock) = cache_with_manual_clock(CacheConfig {
            ttl: Duration::from_secs(300),
            capacity: 2,
            ..CacheConfig::default()
        });
        cache.insert("old", "1".to_string());
        clock.advance(Duration::from_secs(100));
        cache.insert("newer", "2".to_string());

        cache.insert("newest", "3".to_string());
        assert_eq!(cache.get("old"), None);
        assert_eq!(cache.get("newer"), Some("2".to_string()));
        assert_eq!(cache.get("newest"), Some("3".to_string()));
    }

    #[test]
    fn test_clear_drops_everything() {
        let (cache, _clock) = cache_with_manual_clock(CacheConfig::default());
        cache.insert("a", "1".to_string());
        cache.insert("b", "2".to_string());

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }
}
