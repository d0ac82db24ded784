use std::hash::Hash;

use crate::cache::LruCache;
use crate::error::CacheError;
use crate::fifo::FifoCache;
use crate::snapshot::{Eviction, Snapshot};

/// Operations shared by every eviction policy, so instrumentation and replay
/// only need to be written once.
pub trait CachePolicy<K, V> {
    fn name(&self) -> &'static str;

    /// Policy-specific read. For LRU this refreshes recency.
    fn lookup(&mut self, key: &K) -> Option<V>;

    fn store(&mut self, key: K, value: V) -> Option<Eviction<K, V>>;

    fn contains(&self, key: &K) -> bool;

    fn remove(&mut self, key: &K) -> Option<V>;

    fn clear(&mut self);

    fn resize(&mut self, capacity: usize) -> Result<Vec<Eviction<K, V>>, CacheError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn snapshot(&self) -> Snapshot<K, V>;
}

impl<K, V> CachePolicy<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn name(&self) -> &'static str {
        "lru"
    }

    fn lookup(&mut self, key: &K) -> Option<V> {
        LruCache::get_cloned(self, key)
    }

    fn store(&mut self, key: K, value: V) -> Option<Eviction<K, V>> {
        LruCache::put(self, key, value)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }

    fn resize(&mut self, capacity: usize) -> Result<Vec<Eviction<K, V>>, CacheError> {
        LruCache::resize(self, capacity)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn snapshot(&self) -> Snapshot<K, V> {
        LruCache::snapshot(self)
    }
}

impl<K, V> CachePolicy<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn lookup(&mut self, key: &K) -> Option<V> {
        FifoCache::get(self, key).cloned()
    }

    fn store(&mut self, key: K, value: V) -> Option<Eviction<K, V>> {
        FifoCache::put(self, key, value)
    }

    fn contains(&self, key: &K) -> bool {
        FifoCache::contains(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        FifoCache::remove(self, key)
    }

    fn clear(&mut self) {
        FifoCache::clear(self)
    }

    fn resize(&mut self, capacity: usize) -> Result<Vec<Eviction<K, V>>, CacheError> {
        FifoCache::resize(self, capacity)
    }

    fn len(&self) -> usize {
        FifoCache::len(self)
    }

    fn capacity(&self) -> usize {
        FifoCache::capacity(self)
    }

    fn snapshot(&self) -> Snapshot<K, V> {
        FifoCache::snapshot(self)
    }
}
