mod cache;
mod error;
mod fifo;
mod model;
mod policy;
mod replay;
mod sequence;
mod snapshot;
mod trace;
mod tracked;
mod validator;

pub use cache::{LruCache, parse_capacity};
pub use error::{CacheError, CacheErrorKind, ErrorCode, ScriptError, ValidationResult};
pub use fifo::FifoCache;
pub use model::{PolicyKind, Script, Step};
pub use policy::CachePolicy;
pub use replay::{Comparison, ReplayReport, compare, compare_steps, replay, replay_steps};
pub use snapshot::{Eviction, Snapshot, SnapshotEntry};
pub use trace::parse_trace_csv;
pub use tracked::{CacheStats, ExportedState, Operation, OperationKind, TrackedCache};
pub use validator::validate_script;

pub fn parse_script(yaml: &str) -> Result<Script, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}
