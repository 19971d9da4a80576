//! Cache backend implementations.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::key::CacheKey;
use crate::Result;

/// Storage interface for cached responses.
///
/// Backends store opaque bytes; serialization happens in the manager.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>>;
    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()>;
    async fn delete(&self, key: &CacheKey) -> Result<bool>;
    async fn clear(&self) -> Result<()>;
    async fn len(&self) -> Result<usize>;
    fn name(&self) -> &'static str;
}

struct Entry {
    data: Vec<u8>,
    expires_at: Instant,
    last_accessed: Instant,
}

impl Entry {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Bounded in-memory backend with TTL expiry.
///
/// When full, expired entries are dropped first, then the least recently
/// accessed entry.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    max_entries: usize,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    fn make_room(entries: &mut HashMap<String, Entry>, max_entries: usize) {
        let now = Instant::now();
        entries.retain(|_, entry| entry.is_fresh(now));
        while entries.len() >= max_entries {
            let coldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_accessed)
                .map(|(key, _)| key.clone());
            match coldest {
                Some(key) => entries.remove(&key),
                None => break,
            };
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().unwrap();
        let now = Instant::now();
        match entries.get_mut(key.as_str()) {
            Some(entry) if entry.is_fresh(now) => {
                entry.last_accessed = now;
                Ok(Some(entry.data.clone()))
            }
            Some(_) => {
                entries.remove(key.as_str());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        Self::make_room(&mut entries, self.max_entries);
        let now = Instant::now();
        entries.insert(
            key.as_str().to_string(),
            Entry {
                data: value.to_vec(),
                expires_at: now + ttl,
                last_accessed: now,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.entries.write().unwrap().remove(key.as_str()).is_some())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().unwrap().clear();
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .unwrap()
            .values()
            .filter(|entry| entry.is_fresh(now))
            .count())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// No-op backend: stores nothing, hits nothing.
#[derive(Default)]
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheBackend for NullCache {
    async fn get(&self, _: &CacheKey) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _: &CacheKey, _: &[u8], _: Duration) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _: &CacheKey) -> Result<bool> {
        Ok(false)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(0)
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> CacheKey {
        CacheKey::new(s)
    }

    #[tokio::test]
    async fn test_memory_cache_round_trip() {
        let cache = MemoryCache::new(10);
        cache
            .set(&key("a"), b"payload", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            cache.get(&key("a")).await.unwrap(),
            Some(b"payload".to_vec())
        );
        assert_eq!(cache.len().await.unwrap(), 1);
        assert!(cache.delete(&key("a")).await.unwrap());
        assert_eq!(cache.get(&key("a")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_expiry() {
        let cache = MemoryCache::new(10);
        cache
            .set(&key("a"), b"payload", Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(cache.get(&key("a")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_eviction_bound() {
        let cache = MemoryCache::new(2);
        for (name, data) in [("a", b"1"), ("b", b"2"), ("c", b"3")] {
            cache
                .set(&key(name), &data[..], Duration::from_secs(60))
                .await
                .unwrap();
        }
        assert!(cache.len().await.unwrap() <= 2);
        assert_eq!(cache.get(&key("c")).await.unwrap(), Some(b"3".to_vec()));
    }

    #[tokio::test]
    async fn test_null_cache_stores_nothing() {
        let cache = NullCache::new();
        cache
            .set(&key("a"), b"payload", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get(&key("a")).await.unwrap(), None);
        assert_eq!(cache.len().await.unwrap(), 0);
    }
}
