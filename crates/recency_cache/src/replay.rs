use serde::Serialize;

use crate::cache::{LruCache, parse_capacity};
use crate::error::CacheError;
use crate::fifo::FifoCache;
use crate::model::{PolicyKind, Script, Step};
use crate::policy::CachePolicy;
use crate::tracked::{ExportedState, TrackedCache};

pub type ReplayReport = ExportedState<i64, i64>;

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub lru: ReplayReport,
    pub fifo: ReplayReport,
}

pub fn replay(script: &Script) -> Result<ReplayReport, CacheError> {
    replay_steps(script.policy, script.capacity, &script.operations)
}

pub fn compare(script: &Script) -> Result<Comparison, CacheError> {
    compare_steps(script.capacity, &script.operations)
}

pub fn replay_steps(
    policy: PolicyKind,
    capacity: i64,
    steps: &[Step],
) -> Result<ReplayReport, CacheError> {
    let capacity = parse_capacity(capacity).map_err(|err| err.with_path("capacity"))?;
    tracing::debug!(
        policy = policy.as_str(),
        capacity,
        steps = steps.len(),
        "replaying steps"
    );

    match policy {
        PolicyKind::Lru => run(LruCache::new(capacity)?, steps),
        PolicyKind::Fifo => run(FifoCache::new(capacity)?, steps),
    }
}

pub fn compare_steps(capacity: i64, steps: &[Step]) -> Result<Comparison, CacheError> {
    Ok(Comparison {
        lru: replay_steps(PolicyKind::Lru, capacity, steps)?,
        fifo: replay_steps(PolicyKind::Fifo, capacity, steps)?,
    })
}

fn run<P>(policy: P, steps: &[Step]) -> Result<ReplayReport, CacheError>
where
    P: CachePolicy<i64, i64>,
{
    let mut cache = TrackedCache::new(policy);
    for (index, step) in steps.iter().enumerate() {
        match *step {
            Step::Put { key, value } => {
                cache.put(key, value);
            }
            Step::Get { key } => {
                cache.get(key);
            }
            Step::Remove { key } => {
                cache.remove(key);
            }
            Step::Resize { capacity } => {
                let capacity = parse_capacity(capacity)
                    .map_err(|err| err.with_path(format!("operations[{}].capacity", index)))?;
                cache.resize(capacity)?;
            }
            Step::Clear => cache.clear(),
        }
    }

    let report = cache.export();
    tracing::debug!(
        policy = report.policy,
        hits = report.stats.hits,
        misses = report.stats.misses,
        evictions = report.stats.evictions,
        "replay finished"
    );
    Ok(report)
}
