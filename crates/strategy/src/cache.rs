//! In-memory TTL caches for fetched market and news data.
//!
//! Entries carry the instant they were stored; reads check age explicitly
//! against the cache TTL. Uses `DashMap` so the cache can be cloned and
//! shared process-wide without an outer lock.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{Article, MarketInfo};
use dashmap::DashMap;

/// A cached value with staleness tracking.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn is_stale(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) >= ttl
    }
}

/// Thread-safe cache whose entries expire `ttl` after insertion.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash,
{
    entries: Arc<DashMap<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Fresh value for `key` as of `now`. A stale entry is evicted.
    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let stale = match self.entries.get(key) {
            Some(entry) if !entry.is_stale(self.ttl, now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if stale {
            self.entries
                .remove_if(key, |_, entry| entry.is_stale(self.ttl, now));
        }
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&self, key: K, value: V, stored_at: Instant) {
        self.entries.insert(key, CacheEntry { value, stored_at });
    }

    /// Drop every entry regardless of age.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Drop entries that are stale as of `now`; returns how many were removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(self.ttl, now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Market listings keyed by request endpoint.
pub type MarketCache = TtlCache<String, Vec<MarketInfo>>;

/// Article sets keyed by the (truncated) news query.
pub type NewsCache = TtlCache<String, Vec<Article>>;

pub fn new_market_cache(ttl_secs: u64) -> MarketCache {
    TtlCache::new(Duration::from_secs(ttl_secs))
}

pub fn new_news_cache(ttl_secs: u64) -> NewsCache {
    TtlCache::new(Duration::from_secs(ttl_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_returned() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(400));
        let t0 = Instant::now();
        cache.insert_at("fed".into(), 7, t0);
        assert_eq!(cache.get_at(&"fed".to_string(), t0 + Duration::from_secs(399)), Some(7));
    }

    #[test]
    fn test_stale_entry_evicted() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(400));
        let t0 = Instant::now();
        cache.insert_at("fed".into(), 7, t0);
        assert_eq!(cache.get_at(&"fed".to_string(), t0 + Duration::from_secs(400)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_drops_fresh_entries() {
        let cache = new_news_cache(400);
        cache.insert("q1".into(), vec![Article::default()]);
        cache.insert("q2".into(), Vec::new());
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&"q1".to_string()).is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = new_market_cache(600);
        let other = cache.clone();
        other.insert("endpoint".into(), Vec::new());
        assert_eq!(cache.get(&"endpoint".to_string()).map(|v| v.len()), Some(0));
    }

    #[test]
    fn test_purge_expired() {
        let cache: TtlCache<&'static str, u8> = TtlCache::new(Duration::from_secs(10));
        let t0 = Instant::now();
        cache.insert_at("old", 1, t0);
        cache.insert_at("new", 2, t0 + Duration::from_secs(8));
        assert_eq!(cache.purge_expired(t0 + Duration::from_secs(12)), 1);
        assert_eq!(cache.len(), 1);
    }
}
