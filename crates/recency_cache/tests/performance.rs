use std::time::Instant;

use recency_cache::LruCache;

#[test]
#[ignore]
fn perf_mixed_workload() {
    let capacity = env_usize("PERF_CAPACITY", 10_000);
    let operations = env_usize("PERF_OPS", 1_000_000);
    let key_space = env_usize("PERF_KEYS", 50_000) as u64;

    let mut cache = LruCache::new(capacity).expect("valid capacity");
    let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut hits = 0usize;
    let mut evictions = 0usize;

    let start = Instant::now();
    for step in 0..operations {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let key = (seed >> 33) % key_space;
        if step % 2 == 0 {
            if cache.get(&key).is_some() {
                hits += 1;
            }
        } else if cache.put(key, step).is_some() {
            evictions += 1;
        }
    }
    let elapsed = start.elapsed();

    assert!(cache.len() <= capacity);
    eprintln!(
        "perf_mixed_workload capacity={} ops={} hits={} evictions={} elapsed_ms={}",
        capacity,
        operations,
        hits,
        evictions,
        elapsed.as_millis()
    );
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(default)
}
