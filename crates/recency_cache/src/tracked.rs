use std::fmt::Debug;

use serde::Serialize;

use crate::error::CacheError;
use crate::policy::CachePolicy;
use crate::snapshot::{Eviction, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Get,
    Put,
    Remove,
    Clear,
    Evict,
}

/// One entry of the operation history.
///
/// `value` is the stored value for `put`, the returned value for `get` and
/// `remove`, and the dropped value for `evict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation<K, V> {
    pub seq: u64,
    pub kind: OperationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<K>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<V>,
    pub hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evicted: Option<Eviction<K, V>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub total_operations: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Percentage of hits over all counted operations.
    pub hit_rate: f64,
}

impl CacheStats {
    fn record(&mut self, hit: bool, evicted: bool) {
        self.total_operations += 1;
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        if evicted {
            self.evictions += 1;
        }
        self.hit_rate = self.hits as f64 * 100.0 / self.total_operations as f64;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedState<K, V> {
    pub policy: &'static str,
    pub snapshot: Snapshot<K, V>,
    pub operations: Vec<Operation<K, V>>,
    pub stats: CacheStats,
}

/// Wraps a cache policy and keeps hit/miss statistics plus a history of every
/// operation applied through it.
///
/// `get` and `put` count towards the hit rate; a `put` is a hit when the key
/// was already resident. Evictions caused by shrinking the capacity are
/// counted but are neither hits nor misses.
#[derive(Debug)]
pub struct TrackedCache<K, V, P> {
    policy: P,
    history: Vec<Operation<K, V>>,
    stats: CacheStats,
    next_seq: u64,
}

impl<K, V, P> TrackedCache<K, V, P>
where
    K: Clone + Debug,
    V: Clone + Debug,
    P: CachePolicy<K, V>,
{
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            history: Vec::new(),
            stats: CacheStats::default(),
            next_seq: 0,
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn history(&self) -> &[Operation<K, V>] {
        &self.history
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn get(&mut self, key: K) -> Option<V> {
        let result = self.policy.lookup(&key);
        let hit = result.is_some();
        self.stats.record(hit, false);
        self.push(OperationKind::Get, Some(key), result.clone(), hit, None);
        result
    }

    pub fn put(&mut self, key: K, value: V) -> Option<Eviction<K, V>> {
        let hit = self.policy.contains(&key);
        let evicted = self.policy.store(key.clone(), value.clone());
        if let Some(eviction) = &evicted {
            tracing::debug!(
                policy = self.policy.name(),
                key = ?eviction.key,
                value = ?eviction.value,
                "evicted entry"
            );
        }
        self.stats.record(hit, evicted.is_some());
        self.push(
            OperationKind::Put,
            Some(key),
            Some(value),
            hit,
            evicted.clone(),
        );
        evicted
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        let removed = self.policy.remove(&key);
        let hit = removed.is_some();
        self.push(OperationKind::Remove, Some(key), removed.clone(), hit, None);
        removed
    }

    pub fn clear(&mut self) {
        self.policy.clear();
        self.push(OperationKind::Clear, None, None, false, None);
    }

    pub fn resize(&mut self, capacity: usize) -> Result<Vec<Eviction<K, V>>, CacheError> {
        let evicted = self.policy.resize(capacity)?;
        for eviction in &evicted {
            tracing::debug!(
                policy = self.policy.name(),
                capacity,
                key = ?eviction.key,
                "evicted entry on resize"
            );
            self.stats.evictions += 1;
            self.push(
                OperationKind::Evict,
                Some(eviction.key.clone()),
                Some(eviction.value.clone()),
                false,
                None,
            );
        }
        Ok(evicted)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Empties the cache and forgets all history and statistics. Capacity is
    /// kept.
    pub fn reset(&mut self) {
        self.policy.clear();
        self.history.clear();
        self.stats = CacheStats::default();
        self.next_seq = 0;
    }

    pub fn snapshot(&self) -> Snapshot<K, V> {
        self.policy.snapshot()
    }

    pub fn export(&self) -> ExportedState<K, V> {
        ExportedState {
            policy: self.policy.name(),
            snapshot: self.policy.snapshot(),
            operations: self.history.clone(),
            stats: self.stats.clone(),
        }
    }

    fn push(
        &mut self,
        kind: OperationKind,
        key: Option<K>,
        value: Option<V>,
        hit: bool,
        evicted: Option<Eviction<K, V>>,
    ) {
        self.history.push(Operation {
            seq: self.next_seq,
            kind,
            key,
            value,
            hit,
            evicted,
        });
        self.next_seq += 1;
    }
}
