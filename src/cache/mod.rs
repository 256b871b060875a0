//! Cache layer
//!
//! Derived views (filtered and paginated lists) are memoized here, keyed by
//! the inputs that produced them. Stores invalidate their keys on every
//! mutation, so a cached view never outlives the snapshot it was built from.
//!
//! # Usage
//!
//! ```rust,ignore
//! use apidir_admin::cache::{create_cache, CacheLayer};
//! use apidir_admin::config::CacheConfig;
//!
//! let cache = create_cache(&CacheConfig::default());
//! cache.set("categories:filter:gen", &categories).await?;
//! cache.delete_pattern("categories:*").await?;
//! ```

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;

pub use memory::MemoryCache;

/// Cache layer trait
///
/// The generic methods make this trait unusable as a trait object; stores
/// hold the concrete `MemoryCache` behind an `Arc`.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// Store a value; it expires after the cache TTL
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<()>;

    /// Delete a value from cache
    async fn delete(&self, key: &str) -> Result<()>;

    /// Delete all values whose key matches a glob pattern
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;

    /// Clear all cache entries
    async fn clear(&self) -> Result<()>;
}

/// Create a cache instance from configuration
pub fn create_cache(config: &CacheConfig) -> Arc<MemoryCache> {
    let ttl = Duration::from_secs(config.ttl_seconds);
    Arc::new(MemoryCache::with_capacity_and_ttl(config.max_capacity, ttl))
}
