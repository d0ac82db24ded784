use std::collections::HashMap;
use std::hash::Hash;

use crate::error::CacheError;
use crate::sequence::{Handle, RecencySequence};
use crate::snapshot::{Eviction, Snapshot, SnapshotEntry};

/// Upper bound on storage reserved at construction. Capacity is only a limit;
/// storage grows with the number of resident entries.
pub(crate) const MAX_PREALLOC: usize = 1024;

/// Validates a user-supplied capacity. Zero and negative values are rejected
/// with `InvalidConfiguration`.
pub fn parse_capacity(raw: i64) -> Result<usize, CacheError> {
    match usize::try_from(raw) {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(CacheError::invalid_capacity(raw)),
    }
}

/// Fixed-capacity cache with least-recently-used eviction.
///
/// Entries live in a [`RecencySequence`]; `index` maps each resident key to
/// its handle in that sequence. Both structures are updated together by every
/// mutating method, so they always hold the same set of keys.
///
/// [`get`](LruCache::get) is a mutating read: a hit moves the entry to the
/// most recently used position. Use [`peek`](LruCache::peek) to read without
/// touching recency.
#[derive(Debug)]
pub struct LruCache<K, V> {
    index: HashMap<K, Handle>,
    order: RecencySequence<K, V>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::invalid_capacity(capacity));
        }
        Ok(Self {
            index: HashMap::with_capacity(capacity.min(MAX_PREALLOC)),
            order: RecencySequence::with_capacity(capacity.min(MAX_PREALLOC)),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = *self.index.get(key)?;
        self.order.move_to_front(handle);
        self.order.get(handle).map(|(_, value)| value)
    }

    pub fn get_cloned(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.get(key).cloned()
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let handle = *self.index.get(key)?;
        self.order.get(handle).map(|(_, value)| value)
    }

    /// The entry that the next overflowing insertion would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back()
    }

    /// Inserts or updates `key`, making it most recently used.
    ///
    /// Updating a resident key never evicts. Inserting a new key into a full
    /// cache evicts exactly one entry, the least recently used, and returns it.
    pub fn put(&mut self, key: K, value: V) -> Option<Eviction<K, V>> {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(slot) = self.order.value_mut(handle) {
                *slot = value;
            }
            self.order.move_to_front(handle);
            return None;
        }

        let evicted = if self.order.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let handle = self.order.push_front(key.clone(), value);
        self.index.insert(key, handle);
        debug_assert_eq!(self.index.len(), self.order.len());
        evicted
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.index.remove(key)?;
        self.order.remove(handle).map(|(_, value)| value)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Changes the capacity. Shrinking below the current size evicts from the
    /// least recently used end; evictions are returned oldest first.
    pub fn resize(&mut self, capacity: usize) -> Result<Vec<Eviction<K, V>>, CacheError> {
        if capacity == 0 {
            return Err(CacheError::invalid_capacity(capacity));
        }
        self.capacity = capacity;

        let mut evicted = Vec::new();
        while self.order.len() > self.capacity {
            match self.evict_lru() {
                Some(eviction) => evicted.push(eviction),
                None => break,
            }
        }
        Ok(evicted)
    }

    /// Entries from most to least recently used. Does not touch recency.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter()
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

    fn evict_lru(&mut self) -> Option<Eviction<K, V>> {
        let (key, value) = self.order.pop_back()?;
        self.index.remove(&key);
        Some(Eviction { key, value })
    }
}
