//! Cache manager.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use super::backend::CacheBackend;
use super::key::CacheKey;
use crate::Result;

/// Cache behavior configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long entries stay fresh.
    pub ttl: Duration,
    /// Whether the cache starts enabled.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(7 * 24 * 3600),
            enabled: true,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Runtime cache control over a pluggable backend.
///
/// The enabled flag can be flipped at any time through a shared reference;
/// a disabled cache answers every lookup with a miss and stores nothing.
pub struct CacheManager {
    backend: Box<dyn CacheBackend>,
    ttl: Duration,
    enabled: AtomicBool,
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
}

impl CacheManager {
    pub fn new(backend: Box<dyn CacheBackend>, config: CacheConfig) -> Self {
        Self {
            backend,
            ttl: config.ttl,
            enabled: AtomicBool::new(config.enabled),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            sets: AtomicU64::new(0),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Drop every stored entry. Leaves the enabled flag untouched.
    pub async fn clear(&self) -> Result<()> {
        self.backend.clear().await
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<T>> {
        if !self.enabled() {
            return Ok(None);
        }
        match self.backend.get(key).await? {
            Some(data) => match serde_json::from_slice(&data) {
                Ok(value) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    Ok(Some(value))
                }
                // An undecodable entry behaves as a miss.
                Err(_) => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    Ok(None)
                }
            },
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    pub async fn put<T: Serialize>(&self, key: &CacheKey, value: &T) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        let data = serde_json::to_vec(value)?;
        self.backend.set(key, &data, self.ttl).await?;
        self.sets.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::backend::MemoryCache;

    fn manager() -> CacheManager {
        CacheManager::new(Box::new(MemoryCache::new(16)), CacheConfig::default())
    }

    #[tokio::test]
    async fn test_put_get_and_stats() {
        let cache = manager();
        let key = CacheKey::new("k");
        assert_eq!(cache.get::<String>(&key).await.unwrap(), None);
        cache.put(&key, &"value".to_string()).await.unwrap();
        assert_eq!(
            cache.get::<String>(&key).await.unwrap(),
            Some("value".to_string())
        );
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.sets, 1);
        assert!((stats.hit_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_disable_makes_everything_miss() {
        let cache = manager();
        let key = CacheKey::new("k");
        cache.put(&key, &1u32).await.unwrap();
        cache.disable();
        assert!(!cache.enabled());
        assert_eq!(cache.get::<u32>(&key).await.unwrap(), None);
        cache.enable();
        assert_eq!(cache.get::<u32>(&key).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_clear_drops_entries() {
        let cache = manager();
        let key = CacheKey::new("k");
        cache.put(&key, &1u32).await.unwrap();
        cache.clear().await.unwrap();
        assert_eq!(cache.get::<u32>(&key).await.unwrap(), None);
    }
}
