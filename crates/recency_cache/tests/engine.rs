use std::collections::HashSet;

use recency_cache::{CacheErrorKind, Eviction, FifoCache, LruCache, parse_capacity};

fn order(cache: &LruCache<i64, &'static str>) -> Vec<(i64, &'static str)> {
    cache.snapshot().pairs()
}

#[test]
fn zero_capacity_is_invalid_configuration() {
    let err = LruCache::<i64, i64>::new(0).unwrap_err();
    assert_eq!(err.kind, CacheErrorKind::InvalidConfiguration);
}

#[test]
fn negative_capacity_is_invalid_configuration() {
    for raw in [0, -1, i64::MIN] {
        let err = parse_capacity(raw).unwrap_err();
        assert_eq!(err.kind, CacheErrorKind::InvalidConfiguration);
    }
    assert_eq!(parse_capacity(3).unwrap(), 3);
}

#[test]
fn largest_capacity_constructs_without_reserving_it() {
    let capacity = parse_capacity(i64::MAX).unwrap();

    let mut lru = LruCache::<i64, i64>::new(capacity).unwrap();
    assert_eq!(lru.capacity(), capacity);
    assert_eq!(lru.put(1, 10), None);
    assert_eq!(lru.get(&1), Some(&10));

    let mut fifo = FifoCache::<i64, i64>::new(usize::MAX).unwrap();
    assert_eq!(fifo.capacity(), usize::MAX);
    assert_eq!(fifo.put(1, 10), None);
    assert_eq!(fifo.get(&1), Some(&10));

    let lru = LruCache::<i64, i64>::new(usize::MAX).unwrap();
    assert!(lru.is_empty());
}

#[test]
fn put_then_get_round_trips() {
    let mut cache = LruCache::new(3).unwrap();
    cache.put(7, "seven");
    assert_eq!(cache.get(&7), Some(&"seven"));
    assert_eq!(cache.get(&8), None);
}

#[test]
fn absent_key_is_distinct_from_any_value() {
    let mut cache = LruCache::new(2).unwrap();
    cache.put(1, -1i64);
    assert_eq!(cache.get(&1), Some(&-1));
    assert_eq!(cache.get(&2), None);
}

#[test]
fn overflow_evicts_oldest_insertion() {
    let capacity = 4;
    let mut cache = LruCache::new(capacity).unwrap();
    for key in 1..=capacity as i64 {
        assert_eq!(cache.put(key, key * 10), None);
    }

    let evicted = cache.put(capacity as i64 + 1, 50);
    assert_eq!(evicted, Some(Eviction { key: 1, value: 10 }));
    assert_eq!(cache.len(), capacity);
    assert_eq!(cache.get(&1), None);
}

#[test]
fn access_protects_entry_from_eviction() {
    let mut cache = LruCache::new(2).unwrap();
    cache.put(1, "A");
    cache.put(2, "B");
    assert_eq!(cache.get(&1), Some(&"A"));

    let evicted = cache.put(3, "C");
    assert_eq!(evicted, Some(Eviction { key: 2, value: "B" }));
    assert_eq!(cache.get(&1), Some(&"A"));
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(&"C"));
}

#[test]
fn update_moves_to_front_without_growing() {
    let mut cache = LruCache::new(2).unwrap();
    cache.put(1, "A");
    cache.put(2, "B");
    assert_eq!(cache.put(1, "Z"), None);

    assert_eq!(cache.len(), 2);
    assert_eq!(order(&cache), vec![(1, "Z"), (2, "B")]);
}

#[test]
fn get_moves_key_to_front() {
    let mut cache = LruCache::new(3).unwrap();
    cache.put(1, "A");
    cache.put(2, "B");
    cache.put(3, "C");
    cache.get(&1);

    assert_eq!(order(&cache), vec![(1, "A"), (3, "C"), (2, "B")]);
}

#[test]
fn snapshot_and_peek_do_not_touch_recency() {
    let mut cache = LruCache::new(2).unwrap();
    cache.put(1, "A");
    cache.put(2, "B");

    let snapshot = cache.snapshot();
    assert_eq!(snapshot.size, 2);
    assert_eq!(snapshot.capacity, 2);
    assert_eq!(snapshot.keys(), vec![&2, &1]);
    assert_eq!(cache.peek(&1), Some(&"A"));
    assert!(cache.contains(&1));
    assert_eq!(cache.peek_lru(), Some((&1, &"A")));

    let evicted = cache.put(3, "C");
    assert_eq!(evicted, Some(Eviction { key: 1, value: "A" }));
}

#[test]
fn evicted_key_comes_back_as_fresh_entry() {
    let mut cache = LruCache::new(1).unwrap();
    cache.put(1, "A");
    cache.put(2, "B");
    assert_eq!(cache.put(1, "A2"), Some(Eviction { key: 2, value: "B" }));
    assert_eq!(order(&cache), vec![(1, "A2")]);
}

#[test]
fn remove_and_clear() {
    let mut cache = LruCache::new(3).unwrap();
    cache.put(1, "A");
    cache.put(2, "B");
    cache.put(3, "C");

    assert_eq!(cache.remove(&2), Some("B"));
    assert_eq!(cache.remove(&2), None);
    assert_eq!(order(&cache), vec![(3, "C"), (1, "A")]);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 3);
    assert_eq!(cache.get(&1), None);
}

#[test]
fn resize_shrinks_from_lru_end() {
    let mut cache = LruCache::new(4).unwrap();
    for key in 1..=4 {
        cache.put(key, "v");
    }
    cache.get(&1);

    let evicted = cache.resize(2).unwrap();
    let keys: Vec<_> = evicted.iter().map(|eviction| eviction.key).collect();
    assert_eq!(keys, vec![2, 3]);
    assert_eq!(cache.snapshot().keys(), vec![&1, &4]);
    assert_eq!(cache.capacity(), 2);

    assert!(cache.resize(8).unwrap().is_empty());
    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.resize(0).unwrap_err().kind,
        CacheErrorKind::InvalidConfiguration
    );
}

/// Linear-scan model of the same policy. Front of the vector is MRU.
struct ScanModel {
    entries: Vec<(i64, i64)>,
    capacity: usize,
}

impl ScanModel {
    fn get(&mut self, key: i64) -> Option<i64> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.1)
    }

    fn put(&mut self, key: i64, value: i64) -> Option<(i64, i64)> {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
            self.entries.insert(0, (key, value));
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop()
        } else {
            None
        };
        self.entries.insert(0, (key, value));
        evicted
    }
}

#[test]
fn matches_linear_scan_model_over_long_sequence() {
    let capacity = 8;
    let mut cache = LruCache::new(capacity).unwrap();
    let mut model = ScanModel {
        entries: Vec::new(),
        capacity,
    };

    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for step in 0..5_000i64 {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let key = ((seed >> 33) % 20) as i64;

        if (seed >> 17) % 3 == 0 {
            assert_eq!(cache.get_cloned(&key), model.get(key));
        } else {
            let evicted = cache
                .put(key, step)
                .map(|eviction| (eviction.key, eviction.value));
            assert_eq!(evicted, model.put(key, step));
        }

        let snapshot = cache.snapshot();
        let distinct: HashSet<_> = snapshot.entries.iter().map(|entry| entry.key).collect();
        assert_eq!(snapshot.size, distinct.len());
        assert!(snapshot.size <= capacity);
        assert_eq!(snapshot.pairs(), model.entries);
    }
}
