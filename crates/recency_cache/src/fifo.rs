use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::cache::MAX_PREALLOC;
use crate::error::CacheError;
use crate::snapshot::{Eviction, Snapshot, SnapshotEntry};

/// First-in-first-out cache used as a baseline against [`LruCache`].
///
/// Reads never reorder entries and updates keep the original queue position,
/// so the oldest insertion is always evicted first.
///
/// [`LruCache`]: crate::LruCache
#[derive(Debug)]
pub struct FifoCache<K, V> {
    map: HashMap<K, V>,
    // front = oldest insertion
    order: VecDeque<K>,
    capacity: usize,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::invalid_capacity(capacity));
        }
        Ok(Self {
            map: HashMap::with_capacity(capacity.min(MAX_PREALLOC)),
            order: VecDeque::with_capacity(capacity.min(MAX_PREALLOC)),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    pub fn put(&mut self, key: K, value: V) -> Option<Eviction<K, V>> {
        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        self.order.push_back(key.clone());
        self.map.insert(key, value);
        evicted
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.map.remove(key)?;
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        Some(value)
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    pub fn resize(&mut self, capacity: usize) -> Result<Vec<Eviction<K, V>>, CacheError> {
        if capacity == 0 {
            return Err(CacheError::invalid_capacity(capacity));
        }
        self.capacity = capacity;

        let mut evicted = Vec::new();
        while self.map.len() > self.capacity {
            match self.evict_oldest() {
                Some(eviction) => evicted.push(eviction),
                None => break,
            }
        }
        Ok(evicted)
    }

    /// Entries from newest to oldest insertion.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order
            .iter()
            .rev()
            .filter_map(|key| self.map.get(key).map(|value| (key, value)))
    }

    pub fn snapshot(&self) -> Snapshot<K, V>
    where
        V: Clone,
    {
        Snapshot {
            entries: self
                .iter()
                .map(|(key, value)| SnapshotEntry {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
            size: self.len(),
            capacity: self.capacity,
        }
    }

    fn evict_oldest(&mut self) -> Option<Eviction<K, V>> {
        let key = self.order.pop_front()?;
        let value = self.map.remove(&key)?;
        Some(Eviction { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_do_not_protect_entries() {
        let mut cache = FifoCache::new(2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.get(&1), Some(&"a"));

        let evicted = cache.put(3, "c");
        assert_eq!(evicted, Some(Eviction { key: 1, value: "a" }));
        assert!(!cache.contains(&1));
    }

    #[test]
    fn update_keeps_queue_position() {
        let mut cache = FifoCache::new(2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.put(1, "z"), None);

        let evicted = cache.put(3, "c");
        assert_eq!(evicted, Some(Eviction { key: 1, value: "z" }));
        assert_eq!(cache.snapshot().pairs(), vec![(3, "c"), (2, "b")]);
    }

    #[test]
    fn resize_drops_oldest() {
        let mut cache = FifoCache::new(3).unwrap();
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);

        let evicted = cache.resize(1).unwrap();
        assert_eq!(
            evicted,
            vec![
                Eviction { key: 1, value: 10 },
                Eviction { key: 2, value: 20 }
            ]
        );
        assert_eq!(cache.len(), 1);
        assert!(cache.resize(0).is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(FifoCache::<i64, i64>::new(0).is_err());
    }
}
