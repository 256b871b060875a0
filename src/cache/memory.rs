//! In-memory cache implementation using moka
//!
//! Entries are stored as JSON strings so any serializable view can be
//! cached under a string key. Every entry expires after the cache TTL.

use super::CacheLayer;
use anyhow::{Context, Result};
use async_trait::async_trait;
use moka::future::Cache;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default maximum cache capacity (number of entries)
const DEFAULT_MAX_CAPACITY: u64 = 1_000;

/// Default TTL for cache entries (5 minutes)
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// In-memory cache using moka
pub struct MemoryCache {
    cache: Cache<String, Arc<String>>,
    ttl: Duration,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.cache.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl MemoryCache {
    /// Create a new memory cache with default capacity and TTL
    pub fn new() -> Self {
        Self::with_capacity_and_ttl(DEFAULT_MAX_CAPACITY, DEFAULT_TTL)
    }

    /// Create a new memory cache with custom capacity and TTL
    pub fn with_capacity_and_ttl(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { cache, ttl }
    }

    /// TTL applied to every entry
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Approximate number of live entries
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flush moka's pending maintenance (evictions, invalidations)
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Glob-style key matching
///
/// `*` matches any run of characters (including none), `?` exactly one.
pub(crate) fn pattern_matches(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();

    let (mut p, mut k) = (0, 0);
    // Position of the last `*` seen and the key index it was tried against
    let mut backtrack: Option<(usize, usize)> = None;

    while k < key.len() {
        match pattern.get(p).copied() {
            Some('*') => {
                backtrack = Some((p, k));
                p += 1;
            }
            Some(c) if c == '?' || c == key[k] => {
                p += 1;
                k += 1;
            }
            _ => match backtrack {
                Some((star, star_k)) => {
                    p = star + 1;
                    k = star_k + 1;
                    backtrack = Some((star, star_k + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[async_trait]
impl CacheLayer for MemoryCache {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.cache.get(key).await {
            Some(json) => {
                let value = serde_json::from_str(&json).context("Failed to deserialize cache value")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).context("Failed to serialize cache value")?;
        self.cache.insert(key.to_string(), Arc::new(json)).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let keys: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| pattern_matches(pattern, key.as_str()))
            .map(|(key, _)| (*key).clone())
            .collect();

        for key in keys {
            self.cache.invalidate(&key).await;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct View {
        ids: Vec<String>,
        page: usize,
    }

    #[test]
    fn test_pattern_matches() {
        assert!(pattern_matches("submissions:*", "submissions:view:pending:1"));
        assert!(pattern_matches("*", ""));
        assert!(pattern_matches("a?c", "abc"));
        assert!(pattern_matches("a*b*c", "a-x-b-y-c"));
        assert!(pattern_matches("*:1", "categories:1"));
        assert!(!pattern_matches("submissions:*", "categories:filter:"));
        assert!(!pattern_matches("a?c", "ac"));
        assert!(!pattern_matches("abc", "abcd"));
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();
        let view = View { ids: vec!["sub_1".to_string()], page: 1 };

        cache.set("view", &view).await.unwrap();

        let result: Option<View> = cache.get("view").await.unwrap();
        assert_eq!(result, Some(view));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = MemoryCache::new();

        let result: Option<String> = cache.get("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_wrong_type_is_error() {
        let cache = MemoryCache::new();
        cache.set("key", &"text").await.unwrap();

        let result: Result<Option<View>> = cache.get("key").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new();
        cache.set("key", &1u32).await.unwrap();

        cache.delete("key").await.unwrap();

        let result: Option<u32> = cache.get("key").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_pattern() {
        let cache = MemoryCache::new();
        cache.set("submissions:view:a", &1u32).await.unwrap();
        cache.set("submissions:view:b", &2u32).await.unwrap();
        cache.set("categories:filter:a", &3u32).await.unwrap();

        cache.delete_pattern("submissions:*").await.unwrap();

        assert!(cache.get::<u32>("submissions:view:a").await.unwrap().is_none());
        assert!(cache.get::<u32>("submissions:view:b").await.unwrap().is_none());
        assert_eq!(cache.get::<u32>("categories:filter:a").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryCache::new();
        cache.set("a", &1u32).await.unwrap();
        cache.set("b", &2u32).await.unwrap();

        cache.clear().await.unwrap();

        assert!(cache.get::<u32>("a").await.unwrap().is_none());
        assert!(cache.get::<u32>("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let cache = MemoryCache::with_capacity_and_ttl(10, Duration::from_millis(20));
        cache.set("key", &1u32).await.unwrap();
        assert_eq!(cache.get::<u32>("key").await.unwrap(), Some(1));

        tokio::time::sleep(Duration::from_millis(60)).await;
        cache.sync().await;

        assert!(cache.get::<u32>("key").await.unwrap().is_none());
    }
}
