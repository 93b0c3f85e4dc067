use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheValue<V> {
    value: V,
    expires_at: Instant,
}

/// Shared in-memory cache whose entries expire after a fixed TTL.
/// A zero TTL disables caching entirely.
#[derive(Clone)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, CacheValue<V>>>>,
    ttl: Duration,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Send + Sync + std::fmt::Debug,
    V: Clone + Send + Sync,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock().await;
        match cache.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!("Cache HIT for key: {:?}", key);
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!("Cache entry expired for key: {:?}", key);
                cache.remove(key);
                None
            }
            None => {
                debug!("Cache MISS for key: {:?}", key);
                None
            }
        }
    }

    pub async fn put(&self, key: K, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        let expires_at = Instant::now() + self.ttl;
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {:?}", key);
        cache.insert(key, CacheValue { value, expires_at });
    }
}
