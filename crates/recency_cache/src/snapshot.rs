use serde::Serialize;

/// An entry pushed out of a cache, handed back to the caller so it can report
/// or reuse the evicted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Eviction<K, V> {
    pub key: K,
    pub value: V,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry<K, V> {
    pub key: K,
    pub value: V,
}

/// Read-only view of a cache. For LRU the entries run from most to least
/// recently used; for FIFO from newest to oldest insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot<K, V> {
    pub entries: Vec<SnapshotEntry<K, V>>,
    pub size: usize,
    pub capacity: usize,
}

impl<K, V> Snapshot<K, V> {
    pub fn keys(&self) -> Vec<&K> {
        self.entries.iter().map(|entry| &entry.key).collect()
    }

    pub fn pairs(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }
}
